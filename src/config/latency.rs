//! Emulated latency configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Delays that make local analysis look like a remote model call.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Disable to answer immediately
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Lower bound of the per-turn delay in milliseconds
    #[serde(default = "default_min_ms")]
    pub min_ms: u64,

    /// Upper bound (inclusive) of the per-turn delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,

    /// Delay before closing guidance in milliseconds
    #[serde(default = "default_guidance_ms")]
    pub guidance_ms: u64,
}

impl LatencyConfig {
    /// Per-turn delay bounds, or zero when disabled.
    pub fn turn_range(&self) -> (Duration, Duration) {
        if !self.enabled {
            return (Duration::ZERO, Duration::ZERO);
        }
        (Duration::from_millis(self.min_ms), Duration::from_millis(self.max_ms))
    }

    /// Guidance delay, or zero when disabled.
    pub fn guidance_delay(&self) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        Duration::from_millis(self.guidance_ms)
    }

    /// Validate latency configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_ms > self.max_ms {
            return Err(ValidationError::InvalidLatencyRange {
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
            guidance_ms: default_guidance_ms(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_min_ms() -> u64 {
    500
}

fn default_max_ms() -> u64 {
    1000
}

fn default_guidance_ms() -> u64 {
    1000
}
