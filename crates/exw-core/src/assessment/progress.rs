//! Completion counting over a question set.

use serde::{Deserialize, Serialize};

use super::answer::AnswerMap;
use super::question::Question;

/// How much of a question set has an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    /// `answered / total × 100`, or 0 for an empty set.
    pub percent: f64,
}

impl Progress {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.answered == self.total
    }
}

/// Count the questions in `questions` that have an answer in `answers`.
///
/// Answers to questions outside the set are ignored, so the percentage
/// never exceeds 100. N/A answers count as answered.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress(questions: &[Question], answers: &AnswerMap) -> Progress {
    let total = questions.len();
    let answered = questions
        .iter()
        .filter(|q| answers.contains_key(&q.question_id))
        .count();
    let percent = if total == 0 {
        0.0
    } else {
        answered as f64 / total as f64 * 100.0
    };
    Progress {
        answered,
        total,
        percent,
    }
}

/// Index of the first unanswered question, or 0 when all are answered.
#[must_use]
pub fn next_unanswered(questions: &[Question], answers: &AnswerMap) -> usize {
    questions
        .iter()
        .position(|q| !answers.contains_key(&q.question_id))
        .unwrap_or(0)
}
