//! Ports - Interfaces for external dependencies.
//!
//! The dialogue core is synchronous and deterministic apart from two seams:
//!
//! - `RandomSource` - Uniform selection of messages and generic questions
//! - `InferenceDelay` - Emulated analysis latency awaited by the application layer

mod inference_delay;
mod random_source;

pub use inference_delay::InferenceDelay;
pub use random_source::{pick, RandomSource};
