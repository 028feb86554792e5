//! Adapters - Implementations of port interfaces.
//!
//! - `random` - `RandomSource` implementations (entropy-seeded, scripted)
//! - `delay` - `InferenceDelay` implementations (simulated sleep, none)

pub mod delay;
pub mod random;

pub use delay::{NoDelay, SimulatedInferenceDelay};
pub use random::{ScriptedRandomSource, StdRandomSource};
