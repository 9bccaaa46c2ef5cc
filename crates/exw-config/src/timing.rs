//! Client-side timing knobs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Quiet period before a recalculation request fires.
const fn default_debounce_ms() -> u64 {
    800
}

/// Pause before moving to the next question of the same category.
const fn default_advance_question_ms() -> u64 {
    300
}

/// Pause before moving to the next category.
const fn default_advance_category_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_advance_question_ms")]
    pub advance_question_ms: u64,

    #[serde(default = "default_advance_category_ms")]
    pub advance_category_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            advance_question_ms: default_advance_question_ms(),
            advance_category_ms: default_advance_category_ms(),
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn advance_question(&self) -> Duration {
        Duration::from_millis(self.advance_question_ms)
    }

    #[must_use]
    pub const fn advance_category(&self) -> Duration {
        Duration::from_millis(self.advance_category_ms)
    }
}
