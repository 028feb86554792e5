//! Random source adapters.
//!
//! - `StdRandomSource` - Entropy-seeded generator for production use
//! - `ScriptedRandomSource` - Replays a fixed index sequence for tests and demos

mod scripted;
mod std_random;

pub use scripted::ScriptedRandomSource;
pub use std_random::StdRandomSource;
