//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `reflection` - Question bank, emotion classifier and the dialogue engine

pub mod foundation;
pub mod reflection;
