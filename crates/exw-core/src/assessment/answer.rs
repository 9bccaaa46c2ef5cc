//! Answer values and their labels.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// An answer on the 0–6 scale. 0 means "not applicable"; 1–6 are ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AnswerValue(u8);

impl AnswerValue {
    pub const NOT_APPLICABLE: Self = Self(0);
    pub const MAX: u8 = 6;

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `value` is outside `0..=6`.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| {
                CoreError::Validation(format!("answer value must be between 0 and 6, got {value}"))
            })
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_not_applicable(self) -> bool {
        self.0 == 0
    }

    /// Human-readable label on the given scale.
    #[must_use]
    pub const fn label(self, scale: AnswerScale) -> &'static str {
        let labels = match scale {
            AnswerScale::Comparative => &COMPARATIVE_LABELS,
            AnswerScale::Documentation => &DOCUMENTATION_LABELS,
        };
        labels[self.0 as usize]
    }
}

impl TryFrom<i64> for AnswerValue {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnswerValue> for i64 {
    fn from(value: AnswerValue) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which wording a question's 1–6 answers use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerScale {
    /// How the business compares with its competitors.
    #[default]
    Comparative,
    /// How well a practice is understood and written down.
    Documentation,
}

impl AnswerScale {
    /// Scale for a question's `scale_type`; anything but `documentation` is comparative.
    #[must_use]
    pub fn from_scale_type(scale_type: Option<&str>) -> Self {
        match scale_type {
            Some(s) if s.eq_ignore_ascii_case("documentation") => Self::Documentation,
            _ => Self::Comparative,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comparative => "comparative",
            Self::Documentation => "documentation",
        }
    }
}

impl fmt::Display for AnswerScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NOT_APPLICABLE_LABEL: &str = "N/A - Not Applicable";

const COMPARATIVE_LABELS: [&str; 7] = [
    NOT_APPLICABLE_LABEL,
    "Weaker Than All Others",
    "Weaker Than Most",
    "Weak, But Gaining Strength",
    "Strong, And Getting Stronger",
    "Stronger Than Most",
    "Stronger Than All Others",
];

const DOCUMENTATION_LABELS: [&str; 7] = [
    NOT_APPLICABLE_LABEL,
    "I Don't Know What You're Talking About",
    "I've Heard About It, But It's Not Clear",
    "It's Clear, But Not Documented",
    "It's Clear & Documented, But Not Transferable",
    "It's Clear, Documented, & Transferable",
    "It's Perfect - No Improvement Possible",
];

/// Recorded answers keyed by question id.
pub type AnswerMap = BTreeMap<String, AnswerValue>;
