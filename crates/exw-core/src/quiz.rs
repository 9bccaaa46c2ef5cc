//! Exit strategy quiz: questions, local answer tracking and the backend's
//! ranked recommendations.
//!
//! Scoring and ranking happen on the backend. The client only needs to know
//! which questions are still open so it can hold back a submission the
//! backend would reject.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Quiz answers keyed by question id (`Q1`..), valued by option value.
pub type QuizResponses = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub value: String,
    pub label: String,
}

fn default_kind() -> String {
    "single".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    #[must_use]
    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Response of the questions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestions {
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub total_questions: usize,
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizProgress {
    pub answered: usize,
    pub total: usize,
    /// Ids of open questions, in question order.
    pub unanswered: Vec<String>,
}

impl QuizProgress {
    /// Submission is allowed only once every question has an answer.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.total > 0 && self.answered == self.total
    }
}

/// Answered/total over `questions`. Empty answers and answers to questions
/// outside the set are not counted.
#[must_use]
pub fn quiz_progress(questions: &[QuizQuestion], responses: &QuizResponses) -> QuizProgress {
    let unanswered: Vec<String> = questions
        .iter()
        .filter(|q| responses.get(&q.id).is_none_or(|v| v.trim().is_empty()))
        .map(|q| q.id.clone())
        .collect();
    QuizProgress {
        answered: questions.len() - unanswered.len(),
        total: questions.len(),
        unanswered,
    }
}

/// Record `value` as the answer to `question_id`, checking it is one of the
/// question's options.
///
/// # Errors
///
/// `NotFound` for an unknown question, `Validation` for a value that is not
/// one of its options.
pub fn answer(
    questions: &[QuizQuestion],
    responses: &mut QuizResponses,
    question_id: &str,
    value: &str,
) -> Result<(), CoreError> {
    let question = questions
        .iter()
        .find(|q| q.id == question_id)
        .ok_or_else(|| CoreError::NotFound {
            entity_type: "quiz question".to_string(),
            id: question_id.to_string(),
        })?;
    if question.option(value).is_none() {
        let allowed: Vec<&str> = question.options.iter().map(|o| o.value.as_str()).collect();
        return Err(CoreError::Validation(format!(
            "'{value}' is not an option of {question_id} (expected one of: {})",
            allowed.join(", ")
        )));
    }
    responses.insert(question_id.to_string(), value.to_string());
    Ok(())
}

// ---------------------------------------------------------------------------
// Strategies and results
// ---------------------------------------------------------------------------

/// Descriptive card of an exit strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub best_for: String,
}

/// Strategies keyed by strategy key (`strategic_sale`, `esop`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategies {
    pub strategies: BTreeMap<String, Strategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub rank: u32,
    pub key: String,
    #[serde(flatten)]
    pub strategy: Strategy,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedResult {
    pub strategy: String,
    #[serde(default)]
    pub score: f64,
    #[serde(flatten)]
    pub info: Strategy,
}

/// Body of the submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub responses: QuizResponses,
}

/// Outcome of a submission, or the latest stored result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub quiz_id: Option<i64>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detailed_results: Vec<DetailedResult>,
    #[serde(default)]
    pub all_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl QuizResult {
    #[must_use]
    pub fn top(&self) -> Option<&Recommendation> {
        self.recommendations.iter().min_by_key(|r| r.rank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizHistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub top_recommendation: Option<String>,
    #[serde(default)]
    pub second_recommendation: Option<String>,
    #[serde(default)]
    pub third_recommendation: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}
