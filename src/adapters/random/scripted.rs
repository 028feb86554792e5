//! Scripted random source.
//!
//! Replays a fixed list of indices, cycling when it runs out. Each scripted
//! value is reduced modulo the requested bound, so one script works for pools
//! of any size.

use crate::ports::RandomSource;

/// Deterministic random source driven by a script of indices.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomSource {
    script: Vec<usize>,
    cursor: usize,
    draws: usize,
}

impl ScriptedRandomSource {
    /// Creates a source replaying `script`. An empty script always yields 0.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
            draws: 0,
        }
    }

    /// Always picks the first candidate.
    pub fn first() -> Self {
        Self::new(vec![0])
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRandomSource {
    fn next_index(&mut self, upper: usize) -> usize {
        self.draws += 1;
        if self.script.is_empty() || upper == 0 {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor = (self.cursor + 1) % self.script.len();
        value % upper
    }
}
