//! Simulated analysis latency.
//!
//! Each turn sleeps for a uniform random interval within the configured
//! bounds; guidance sleeps for a fixed interval. Calls are counted so tests
//! can verify the handler awaited the port.

use async_trait::async_trait;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::LatencyConfig;
use crate::ports::InferenceDelay;

/// Tokio-sleep backed [`InferenceDelay`].
#[derive(Debug, Default)]
pub struct SimulatedInferenceDelay {
    turn_min: Duration,
    turn_max: Duration,
    guidance: Duration,
    turns: AtomicUsize,
    guidances: AtomicUsize,
}

impl SimulatedInferenceDelay {
    /// Creates a delay with explicit bounds. Inverted bounds are swapped.
    pub fn new(turn_min: Duration, turn_max: Duration, guidance: Duration) -> Self {
        let (turn_min, turn_max) = if turn_min <= turn_max {
            (turn_min, turn_max)
        } else {
            (turn_max, turn_min)
        };
        Self {
            turn_min,
            turn_max,
            guidance,
            turns: AtomicUsize::new(0),
            guidances: AtomicUsize::new(0),
        }
    }

    /// Creates a delay from the latency section of the app config.
    pub fn from_config(config: &LatencyConfig) -> Self {
        let (min, max) = config.turn_range();
        Self::new(min, max, config.guidance_delay())
    }

    /// Number of turn delays awaited so far.
    pub fn turn_count(&self) -> usize {
        self.turns.load(Ordering::SeqCst)
    }

    /// Number of guidance delays awaited so far.
    pub fn guidance_count(&self) -> usize {
        self.guidances.load(Ordering::SeqCst)
    }

    fn turn_delay(&self) -> Duration {
        if self.turn_min == self.turn_max {
            return self.turn_min;
        }
        let millis = rand::thread_rng()
            .gen_range(self.turn_min.as_millis() as u64..=self.turn_max.as_millis() as u64);
        Duration::from_millis(millis)
    }
}

#[async_trait]
impl InferenceDelay for SimulatedInferenceDelay {
    async fn before_turn(&self) {
        self.turns.fetch_add(1, Ordering::SeqCst);
        let delay = self.turn_delay();
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }

    async fn before_guidance(&self) {
        self.guidances.fetch_add(1, Ordering::SeqCst);
        if !self.guidance.is_zero() {
            sleep(self.guidance).await;
        }
    }
}

/// [`InferenceDelay`] that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl InferenceDelay for NoDelay {
    async fn before_turn(&self) {}

    async fn before_guidance(&self) {}
}
