//! Inference Delay Port - Emulated model latency.
//!
//! The engine is a local computation, but the product presents it as a
//! remote analysis. Adapters decide how long each step appears to take.

use async_trait::async_trait;

/// Port for emulated processing latency.
#[async_trait]
pub trait InferenceDelay: Send + Sync {
    /// Waits before a submitted answer is analysed.
    async fn before_turn(&self);

    /// Waits before the closing guidance is produced.
    async fn before_guidance(&self);
}
