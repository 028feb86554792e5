//! Inference delay adapters.
//!
//! - `SimulatedInferenceDelay` - Sleeps for a randomized interval per turn
//! - `NoDelay` - Returns immediately, for tests and scripted runs

mod simulated;

pub use simulated::{NoDelay, SimulatedInferenceDelay};
