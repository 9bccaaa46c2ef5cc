//! Assessments, responses and tasks as exchanged with the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::answer::{AnswerMap, AnswerValue};
use super::question::Question;

/// One answered question of an assessment. Created on first answer and
/// overwritten on re-answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub question_id: String,
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub answer_value: Option<AnswerValue>,
    #[serde(default)]
    pub answer_text: Option<String>,
    /// Backend score, 0–100.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// The user's current assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    #[serde(default)]
    pub answered_questions: u32,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub attractiveness_score: Option<f64>,
    /// Per category key, the backend's 0–100 score.
    #[serde(default)]
    pub category_scores: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub responses: Vec<AssessmentResponse>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Assessment {
    /// Answers keyed by question id. Responses without a value are skipped.
    #[must_use]
    pub fn answers(&self) -> AnswerMap {
        answers_from(&self.responses)
    }
}

fn answers_from(responses: &[AssessmentResponse]) -> AnswerMap {
    responses
        .iter()
        .filter_map(|r| r.answer_value.map(|value| (r.question_id.clone(), value)))
        .collect()
}

/// A past assessment from the history list or the detail endpoint.
///
/// Category scores arrive as flat `<category>_score` keys and are collected
/// into [`Self::scores`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub id: i64,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub attractiveness_score: Option<f64>,
    #[serde(default)]
    pub answered_questions: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<AssessmentResponse>,
    #[serde(flatten)]
    pub scores: BTreeMap<String, Option<f64>>,
}

impl AssessmentSnapshot {
    /// Score of `category` (e.g. `revenue_quality`), if reported.
    #[must_use]
    pub fn category_score(&self, category: &str) -> Option<f64> {
        self.scores.get(&format!("{category}_score")).copied().flatten()
    }
}

/// Newly created assessment returned by start and retake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedAssessment {
    pub id: i64,
    #[serde(default)]
    pub answered_questions: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of the save-response endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<i64>,
    pub question_id: String,
    pub category: String,
    pub subject: Option<String>,
    pub question_text: String,
    pub answer_value: AnswerValue,
    pub answer_text: String,
    pub comments: String,
    pub rule_of_thumb: Option<String>,
    pub considerations: Option<String>,
}

impl SaveResponseRequest {
    /// Build the request for answering `question` with `value`.
    ///
    /// `answer_text` is the label of `value` on the question's scale.
    #[must_use]
    pub fn new(
        assessment_id: Option<i64>,
        question: &Question,
        value: AnswerValue,
        comments: Option<String>,
    ) -> Self {
        Self {
            assessment_id,
            question_id: question.question_id.clone(),
            category: question.category.clone(),
            subject: question.subject.clone(),
            question_text: question.question_text.clone(),
            answer_value: value,
            answer_text: value.label(question.scale()).to_string(),
            comments: comments.unwrap_or_default(),
            rule_of_thumb: question.rule_of_thumb.clone(),
            considerations: question.considerations.clone(),
        }
    }
}

/// Acknowledgement of a saved response with refreshed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResponse {
    pub response: SavedResponseRow,
    pub assessment: AssessmentTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResponseRow {
    #[serde(default)]
    pub id: Option<i64>,
    pub question_id: String,
    #[serde(default)]
    pub answer_value: Option<AnswerValue>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentTotals {
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub attractiveness_score: Option<f64>,
    #[serde(default)]
    pub answered_questions: u32,
}

/// Follow-up work item generated from an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentTask {
    pub id: i64,
    pub assessment_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Free text on the backend (`To do`, `in_progress`, `completed`, ...).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::question::question;
    use pretty_assertions::assert_eq;

    const CURRENT_FIXTURE: &str = r#"{
        "id": 9,
        "answered_questions": 2,
        "overall_score": 58.5,
        "attractiveness_score": 61.0,
        "category_scores": {
            "financial_performance": 58.5,
            "revenue_quality": null
        },
        "responses": [
            {
                "question_id": "FP-01",
                "question_text": "How predictable is your cash flow?",
                "category": "financial_performance",
                "subject": "Cash Flow",
                "answer_value": 4,
                "answer_text": "Strong, And Getting Stronger",
                "score": 67.0,
                "comments": null
            },
            {
                "question_id": "FP-02",
                "answer_value": null,
                "score": 0.0
            }
        ],
        "created_at": "2026-02-01T09:00:00",
        "updated_at": null
    }"#;

    #[test]
    fn parses_current_assessment() {
        let assessment: Assessment = serde_json::from_str(CURRENT_FIXTURE).unwrap();
        assert_eq!(assessment.id, 9);
        assert_eq!(assessment.category_scores["revenue_quality"], None);
        assert_eq!(assessment.responses.len(), 2);

        let answers = assessment.answers();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers["FP-01"].get(), 4);
    }

    #[test]
    fn snapshot_collects_flat_category_scores() {
        let json = r#"{
            "id": 3,
            "overall_score": 40.0,
            "attractiveness_score": 44.0,
            "financial_performance_score": 50.0,
            "owner_dependency_score": null,
            "answered_questions": 12,
            "created_at": "2025-11-01T00:00:00",
            "updated_at": null
        }"#;
        let snapshot: AssessmentSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.category_score("financial_performance"), Some(50.0));
        assert_eq!(snapshot.category_score("owner_dependency"), None);
        assert_eq!(snapshot.category_score("unknown"), None);
        assert!(snapshot.responses.is_empty());
    }

    #[test]
    fn save_request_carries_scale_label() {
        let mut q = question("DOC-1", "legal_compliance");
        q.scale_type = Some("documentation".into());

        let request = SaveResponseRequest::new(Some(9), &q, AnswerValue::new(3).unwrap(), None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["answer_value"], 3);
        assert_eq!(json["answer_text"], "It's Clear, But Not Documented");
        assert_eq!(json["comments"], "");
        assert_eq!(json["assessment_id"], 9);
    }
}
