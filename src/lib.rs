//! Tree Hollow - Guided self-reflection dialogue engine
//!
//! Detects the user's emotional state from free text, walks a three-tier
//! question bank (identify, explore, cope), and closes the session with a
//! guidance text chosen for the final emotion.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
