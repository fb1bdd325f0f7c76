//! Death saving throw state.

use serde::{Deserialize, Serialize};

/// Number of successes or failures that ends the death save sequence.
pub const DEATH_SAVE_THRESHOLD: i32 = 3;

/// Success/failure counters of a downed character, each in `0..=3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathSaves {
    pub successes: i32,
    pub failures: i32,
}

/// Result of a single death saving throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathSaveOutcome {
    Success,
    Failure,
    /// Natural 20: counts as two successes.
    CriticalSuccess,
    /// Natural 1: counts as two failures.
    CriticalFailure,
    Reset,
}

impl DeathSaves {
    pub fn new(successes: i32, failures: i32) -> Self {
        Self {
            successes,
            failures,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.failures >= DEATH_SAVE_THRESHOLD
    }

    pub fn is_stable(&self) -> bool {
        self.successes >= DEATH_SAVE_THRESHOLD
    }

    /// Apply one roll outcome. Counters are clamped to `0..=3`.
    pub fn record(self, outcome: DeathSaveOutcome) -> Self {
        let (successes, failures) = match outcome {
            DeathSaveOutcome::Success => (self.successes + 1, self.failures),
            DeathSaveOutcome::Failure => (self.successes, self.failures + 1),
            DeathSaveOutcome::CriticalSuccess => (self.successes + 2, self.failures),
            DeathSaveOutcome::CriticalFailure => (self.successes, self.failures + 2),
            DeathSaveOutcome::Reset => (0, 0),
        };
        Self {
            successes: successes.clamp(0, DEATH_SAVE_THRESHOLD),
            failures: failures.clamp(0, DEATH_SAVE_THRESHOLD),
        }
    }

    pub fn reset(self) -> Self {
        self.record(DeathSaveOutcome::Reset)
    }
}
