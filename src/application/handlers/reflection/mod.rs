//! Reflection session command handlers.
//!
//! Sessions live in a shared [`SessionRegistry`]; the three handlers open a
//! session, answer its pending question, and close it with guidance.

mod finish_session;
mod registry;
mod start_session;
mod submit_answer;

pub use finish_session::{
    FinishSessionCommand, FinishSessionError, FinishSessionHandler, FinishSessionResult,
};
pub use registry::{SessionRegistry, SharedEngine};
pub use start_session::{
    RandomSourceFactory, StartSessionCommand, StartSessionHandler, StartSessionResult,
};
pub use submit_answer::{
    SubmitAnswerCommand, SubmitAnswerError, SubmitAnswerHandler, SubmitAnswerResult,
};
