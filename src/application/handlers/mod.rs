//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod reflection;

pub use reflection::{
    // Start
    RandomSourceFactory, StartSessionCommand, StartSessionHandler, StartSessionResult,
    // Submit
    SubmitAnswerCommand, SubmitAnswerError, SubmitAnswerHandler, SubmitAnswerResult,
    // Finish
    FinishSessionCommand, FinishSessionError, FinishSessionHandler, FinishSessionResult,
    // Registry
    SessionRegistry, SharedEngine,
};
