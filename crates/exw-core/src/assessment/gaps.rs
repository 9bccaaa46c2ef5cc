//! Gap analysis: score bands and category score summaries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::question::Question;
use super::response::AssessmentResponse;

/// Scored categories in report order, with display names.
pub const SCORED_CATEGORIES: [(&str, &str); 10] = [
    ("financial_performance", "Financial Health"),
    ("revenue_quality", "Revenue Quality"),
    ("customer_concentration", "Customer Base"),
    ("management_team", "Management Team"),
    ("competitive_position", "Competitive Position"),
    ("growth_potential", "Growth Trajectory"),
    ("intellectual_property", "Intellectual Property"),
    ("legal_compliance", "Legal & Compliance"),
    ("owner_dependency", "Owner Dependency"),
    ("strategic_positioning", "Strategic Position"),
];

/// Display name of a scored category, if it is one.
#[must_use]
pub fn category_display_name(key: &str) -> Option<&'static str> {
    SCORED_CATEGORIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

/// Severity band of a 0–100 response score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapZone {
    NoGaps,
    MinorGaps,
    ConsiderableGaps,
    CriticalGaps,
    VeryCriticalGaps,
    ExtremelyCritical,
    #[serde(rename = "n-a")]
    NotApplicable,
}

impl GapZone {
    pub const ALL: [Self; 7] = [
        Self::NoGaps,
        Self::MinorGaps,
        Self::ConsiderableGaps,
        Self::CriticalGaps,
        Self::VeryCriticalGaps,
        Self::ExtremelyCritical,
        Self::NotApplicable,
    ];

    /// Band for `score`. Exactly 0 is N/A; the lower bound of each band is
    /// exclusive.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_score(score: f64) -> Self {
        if score == 0.0 {
            Self::NotApplicable
        } else if score > 86.0 {
            Self::NoGaps
        } else if score > 72.0 {
            Self::MinorGaps
        } else if score > 57.0 {
            Self::ConsiderableGaps
        } else if score > 43.0 {
            Self::CriticalGaps
        } else if score > 28.0 {
            Self::VeryCriticalGaps
        } else {
            Self::ExtremelyCritical
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoGaps => "no-gaps",
            Self::MinorGaps => "minor-gaps",
            Self::ConsiderableGaps => "considerable-gaps",
            Self::CriticalGaps => "critical-gaps",
            Self::VeryCriticalGaps => "very-critical-gaps",
            Self::ExtremelyCritical => "extremely-critical",
            Self::NotApplicable => "n-a",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoGaps => "No Gaps",
            Self::MinorGaps => "Minor Gaps",
            Self::ConsiderableGaps => "Considerable Gaps",
            Self::CriticalGaps => "Critical Gaps",
            Self::VeryCriticalGaps => "Very Critical Gaps",
            Self::ExtremelyCritical => "Extremely Critical",
            Self::NotApplicable => "N/A",
        }
    }

    /// Score range covered, as shown in reports.
    #[must_use]
    pub const fn range(self) -> &'static str {
        match self {
            Self::NoGaps => ">86%",
            Self::MinorGaps => "72-86%",
            Self::ConsiderableGaps => "57-72%",
            Self::CriticalGaps => "43-57%",
            Self::VeryCriticalGaps => "28-43%",
            Self::ExtremelyCritical => "0-28%",
            Self::NotApplicable => "n/a",
        }
    }

    /// Hex colour used for the band in charts.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::NoGaps => "#c49e73",
            Self::MinorGaps => "#a7d5a8",
            Self::ConsiderableGaps => "#b8d4e8",
            Self::CriticalGaps => "#f4ebb0",
            Self::VeryCriticalGaps => "#f5d7b3",
            Self::ExtremelyCritical => "#f5c9c9",
            Self::NotApplicable => "#e5e7eb",
        }
    }
}

impl fmt::Display for GapZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Responses grouped by the band of their score. Every zone is present,
/// possibly empty.
#[must_use]
pub fn group_by_zone(responses: &[AssessmentResponse]) -> BTreeMap<GapZone, Vec<&AssessmentResponse>> {
    let mut zones: BTreeMap<GapZone, Vec<&AssessmentResponse>> =
        GapZone::ALL.iter().map(|zone| (*zone, Vec::new())).collect();
    for response in responses {
        let zone = GapZone::from_score(response.score.unwrap_or(0.0));
        zones.entry(zone).or_default().push(response);
    }
    zones
}

/// Mean response score per scored category, excluding N/A answers.
///
/// Categories without a scored answer get 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn category_means(questions: &[Question], responses: &[AssessmentResponse]) -> BTreeMap<String, f64> {
    SCORED_CATEGORIES
        .iter()
        .map(|(key, _)| {
            let scores: Vec<f64> = responses
                .iter()
                .filter(|r| r.answer_value.is_none_or(|v| !v.is_not_applicable()))
                .filter(|r| {
                    questions
                        .iter()
                        .any(|q| q.category == *key && q.question_id == r.question_id)
                })
                .map(|r| r.score.unwrap_or(0.0))
                .collect();
            let mean = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            };
            ((*key).to_string(), mean)
        })
        .collect()
}

/// The category scores to report.
///
/// When the backend reports the same value for every category (it is then
/// echoing the overall score) the per-category means of the responses are
/// used instead.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn effective_category_scores(
    reported: &BTreeMap<String, Option<f64>>,
    questions: &[Question],
    responses: &[AssessmentResponse],
) -> BTreeMap<String, f64> {
    let mut values = reported.values();
    let all_same = values
        .next()
        .is_some_and(|first| values.all(|v| v == first));

    if all_same {
        tracing::debug!("category scores are uniform, using response means");
        return category_means(questions, responses);
    }
    reported
        .iter()
        .map(|(key, score)| (key.clone(), score.unwrap_or(0.0)))
        .collect()
}
