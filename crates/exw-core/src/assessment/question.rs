//! Assessment questions and their grouping into categories.

use serde::{Deserialize, Serialize};

use super::answer::AnswerScale;

/// A question as served by the assessment backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: Option<i64>,
    /// Stable identifier responses are keyed by.
    pub question_id: String,
    pub question_text: String,
    pub category: String,
    #[serde(default)]
    pub category_display: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub rule_of_thumb: Option<String>,
    #[serde(default)]
    pub considerations: Option<String>,
    #[serde(default)]
    pub answer_options: Option<serde_json::Value>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub scale_type: Option<String>,
}

impl Question {
    #[must_use]
    pub fn scale(&self) -> AnswerScale {
        AnswerScale::from_scale_type(self.scale_type.as_deref())
    }
}

/// Questions sharing a category, in served order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub name: String,
    pub questions: Vec<Question>,
}

/// Group questions by category, ordering categories by first appearance.
///
/// The display name comes from the first question's `category_display`,
/// falling back to the category key.
#[must_use]
pub fn group_by_category(questions: &[Question]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    for question in questions {
        if let Some(category) = categories.iter_mut().find(|c| c.key == question.category) {
            category.questions.push(question.clone());
        } else {
            categories.push(Category {
                key: question.category.clone(),
                name: question
                    .category_display
                    .clone()
                    .unwrap_or_else(|| question.category.clone()),
                questions: vec![question.clone()],
            });
        }
    }
    categories
}

#[cfg(test)]
pub(crate) fn question(question_id: &str, category: &str) -> Question {
    Question {
        id: None,
        question_id: question_id.to_string(),
        question_text: format!("{question_id}?"),
        category: category.to_string(),
        category_display: None,
        subject: None,
        rule_of_thumb: None,
        considerations: None,
        answer_options: None,
        weight: None,
        scale_type: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "questions": [
            {
                "id": 1,
                "question_id": "FP-01",
                "question_text": "How predictable is your cash flow?",
                "category": "financial_performance",
                "category_display": "Financial Performance",
                "subject": "Cash Flow",
                "rule_of_thumb": "Buyers pay for predictability.",
                "considerations": null,
                "answer_options": null,
                "weight": 1.0,
                "scale_type": "comparative"
            },
            {
                "id": 2,
                "question_id": "FP-02",
                "question_text": "Are your financial statements reviewed?",
                "category": "financial_performance",
                "category_display": "Financial Performance",
                "subject": "Reporting",
                "scale_type": "documentation"
            }
        ],
        "count": 2
    }"#;

    #[derive(Deserialize)]
    struct Envelope {
        questions: Vec<Question>,
    }

    #[test]
    fn parses_backend_questions() {
        let envelope: Envelope = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(envelope.questions.len(), 2);
        assert_eq!(envelope.questions[0].scale(), AnswerScale::Comparative);
        assert_eq!(envelope.questions[1].scale(), AnswerScale::Documentation);
        assert_eq!(envelope.questions[1].considerations, None);
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let questions = vec![
            question("a1", "alpha"),
            question("b1", "beta"),
            question("a2", "alpha"),
            question("c1", "gamma"),
        ];

        let categories = group_by_category(&questions);
        let keys: Vec<_> = categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "beta", "gamma"]);
        assert_eq!(categories[0].questions.len(), 2);
        assert_eq!(categories[0].questions[1].question_id, "a2");
        assert_eq!(categories[1].name, "beta");
    }
}
