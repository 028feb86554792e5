//! Guided self-reflection dialogue.
//!
//! A session walks three tiers of questions: identify the feeling, explore
//! its cause, then try a coping step. Each answer is classified into an
//! [`Emotion`], which picks the next question and the companion message that
//! goes with it. Once the question supply runs out the session ends and a
//! closing guidance text is produced.

mod companion;
mod emotion;
mod engine;
mod guidance;
mod question;
mod question_bank;
mod session;
mod state;

pub use companion::{CompanionMessage, PresentationTag, ResponseComposer};
pub use emotion::{Emotion, EmotionClassifier, EmotionKeywords, SHORT_TEXT_CHARS};
pub use engine::{DialogueEngine, DialoguePolicy, IdentificationPolicy, TurnOutcome};
pub use guidance::{GuidanceGenerator, GuidanceTemplate};
pub use question::{Question, QuestionResponse, Tier};
pub use question_bank::{QuestionBank, QuestionBankSections, IDENTIFICATION_LEN};
pub use session::TherapySession;
pub use state::DialogueState;
