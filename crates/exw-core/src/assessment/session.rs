//! The answering session: where the user is and where to go next.
//!
//! ```text
//! loading → in_progress(category, question) → complete
//! ```
//!
//! The session becomes complete once every question has an answer. There
//! is no branching and no way back to `loading`; re-answering a question in
//! a complete session overwrites it and stays complete.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::answer::{AnswerMap, AnswerValue};
use super::progress::{Progress, next_unanswered, progress};
use super::question::{Category, Question, group_by_category};
use crate::errors::CoreError;

/// Pause before moving to the next question of the same category.
pub const DEFAULT_QUESTION_DELAY: Duration = Duration::from_millis(300);

/// Pause before moving to the next category.
pub const DEFAULT_CATEGORY_DELAY: Duration = Duration::from_millis(500);

/// Delays applied to auto-advance. Only timing is configurable; the order
/// of questions and categories is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvancePolicy {
    pub question_delay: Duration,
    pub category_delay: Duration,
}

impl Default for AdvancePolicy {
    fn default() -> Self {
        Self {
            question_delay: DEFAULT_QUESTION_DELAY,
            category_delay: DEFAULT_CATEGORY_DELAY,
        }
    }
}

/// Position within the grouped question set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub category: usize,
    pub question: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SessionState {
    Loading,
    InProgress { category: usize, question: usize },
    Complete,
}

impl SessionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::InProgress { .. } => "in_progress",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled move of the cursor after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub to: Cursor,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct AssessmentSession {
    policy: AdvancePolicy,
    loaded: bool,
    categories: Vec<Category>,
    answers: AnswerMap,
    cursor: Cursor,
}

impl AssessmentSession {
    #[must_use]
    pub const fn new(policy: AdvancePolicy) -> Self {
        Self {
            policy,
            loaded: false,
            categories: Vec::new(),
            answers: AnswerMap::new(),
            cursor: Cursor {
                category: 0,
                question: 0,
            },
        }
    }

    /// Leave `loading` with the served questions and the answers recorded so far.
    ///
    /// The cursor starts at the first unanswered question of the first
    /// category that still has one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if the session was already loaded.
    pub fn load(&mut self, questions: &[Question], answers: AnswerMap) -> Result<(), CoreError> {
        if self.loaded {
            return Err(self.invalid_transition("loading"));
        }
        self.categories = group_by_category(questions);
        self.answers = answers;
        self.loaded = true;

        let category = self
            .categories
            .iter()
            .position(|c| c.questions.iter().any(|q| !self.answers.contains_key(&q.question_id)))
            .unwrap_or(0);
        self.cursor = self.cursor_at_category(category);
        tracing::debug!(
            categories = self.categories.len(),
            answered = self.answers.len(),
            state = %self.state(),
            "assessment session loaded"
        );
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if !self.loaded {
            return SessionState::Loading;
        }
        if self.progress().is_complete() {
            return SessionState::Complete;
        }
        SessionState::InProgress {
            category: self.cursor.category,
            question: self.cursor.question,
        }
    }

    /// Record an answer the backend has accepted and work out where to go next.
    ///
    /// The next question of the same category follows after the question
    /// delay. After the last question of a category, the first unanswered
    /// question of the next category follows after the category delay.
    /// The last question of the last category yields no advance.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidTransition`] while loading, [`CoreError::NotFound`]
    /// for a question outside the set.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<Option<Advance>, CoreError> {
        if !self.loaded {
            return Err(self.invalid_transition("answered"));
        }
        let position = self.locate(question_id).ok_or_else(|| CoreError::NotFound {
            entity_type: "question".to_string(),
            id: question_id.to_string(),
        })?;

        self.answers.insert(question_id.to_string(), value);
        self.cursor = position;

        let in_category = self.categories[position.category].questions.len();
        if position.question + 1 < in_category {
            return Ok(Some(Advance {
                to: Cursor {
                    category: position.category,
                    question: position.question + 1,
                },
                delay: self.policy.question_delay,
            }));
        }
        if position.category + 1 < self.categories.len() {
            return Ok(Some(Advance {
                to: self.cursor_at_category(position.category + 1),
                delay: self.policy.category_delay,
            }));
        }
        Ok(None)
    }

    /// Move the cursor once an advance's delay has elapsed.
    pub fn apply_advance(&mut self, advance: Advance) {
        if self.cursor_is_valid(advance.to) {
            self.cursor = advance.to;
        }
    }

    /// Jump to a category, landing on its first unanswered question.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] when `index` is out of range.
    pub fn open_category(&mut self, index: usize) -> Result<Cursor, CoreError> {
        if index >= self.categories.len() {
            return Err(CoreError::NotFound {
                entity_type: "category".to_string(),
                id: index.to_string(),
            });
        }
        self.cursor = self.cursor_at_category(index);
        Ok(self.cursor)
    }

    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.categories
            .get(self.cursor.category)
            .and_then(|c| c.questions.get(self.cursor.question))
    }

    /// The first unanswered question across all categories, in order.
    #[must_use]
    pub fn first_unanswered(&self) -> Option<(Cursor, &Question)> {
        self.categories.iter().enumerate().find_map(|(ci, category)| {
            category
                .questions
                .iter()
                .enumerate()
                .find(|(_, q)| !self.answers.contains_key(&q.question_id))
                .map(|(qi, q)| {
                    (
                        Cursor {
                            category: ci,
                            question: qi,
                        },
                        q,
                    )
                })
        })
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        let questions: Vec<Question> = self
            .categories
            .iter()
            .flat_map(|c| c.questions.iter().cloned())
            .collect();
        progress(&questions, &self.answers)
    }

    #[must_use]
    pub fn category_progress(&self, index: usize) -> Option<Progress> {
        self.categories
            .get(index)
            .map(|c| progress(&c.questions, &self.answers))
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub const fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Look up a question and its position by id.
    #[must_use]
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.locate(question_id)
            .map(|c| &self.categories[c.category].questions[c.question])
    }

    fn locate(&self, question_id: &str) -> Option<Cursor> {
        self.categories.iter().enumerate().find_map(|(ci, category)| {
            category
                .questions
                .iter()
                .position(|q| q.question_id == question_id)
                .map(|qi| Cursor {
                    category: ci,
                    question: qi,
                })
        })
    }

    fn cursor_at_category(&self, category: usize) -> Cursor {
        let question = self
            .categories
            .get(category)
            .map_or(0, |c| next_unanswered(&c.questions, &self.answers));
        Cursor { category, question }
    }

    fn cursor_is_valid(&self, cursor: Cursor) -> bool {
        self.categories
            .get(cursor.category)
            .is_some_and(|c| cursor.question < c.questions.len())
    }

    fn invalid_transition(&self, to: &str) -> CoreError {
        CoreError::InvalidTransition {
            entity_type: "assessment_session".to_string(),
            id: String::new(),
            from: self.state().to_string(),
            to: to.to_string(),
        }
    }
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new(AdvancePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::question::question;
    use pretty_assertions::assert_eq;

    fn questions() -> Vec<Question> {
        vec![
            question("a1", "alpha"),
            question("a2", "alpha"),
            question("b1", "beta"),
            question("b2", "beta"),
            question("b3", "beta"),
        ]
    }

    fn value(v: i64) -> AnswerValue {
        AnswerValue::new(v).unwrap()
    }

    fn loaded(answers: &[&str]) -> AssessmentSession {
        let mut session = AssessmentSession::default();
        let answers = answers.iter().map(|id| ((*id).to_string(), value(4))).collect();
        session.load(&questions(), answers).unwrap();
        session
    }

    #[test]
    fn starts_loading_and_rejects_answers() {
        let mut session = AssessmentSession::default();
        assert_eq!(session.state(), SessionState::Loading);
        assert!(matches!(
            session.record_answer("a1", value(3)),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn load_lands_on_first_unanswered_question() {
        let session = loaded(&["a1", "a2", "b1"]);
        assert_eq!(session.state(), SessionState::InProgress { category: 1, question: 1 });
        assert_eq!(session.current_question().unwrap().question_id, "b2");
    }

    #[test]
    fn loading_twice_is_rejected() {
        let mut session = loaded(&[]);
        assert!(session.load(&questions(), AnswerMap::new()).is_err());
    }

    #[test]
    fn advances_within_category_after_short_delay() {
        let mut session = loaded(&[]);
        let advance = session.record_answer("a1", value(5)).unwrap().unwrap();
        assert_eq!(advance.to, Cursor { category: 0, question: 1 });
        assert_eq!(advance.delay, Duration::from_millis(300));

        session.apply_advance(advance);
        assert_eq!(session.current_question().unwrap().question_id, "a2");
    }

    #[test]
    fn last_question_moves_to_next_categorys_first_unanswered() {
        let mut session = loaded(&["b1"]);
        session.record_answer("a1", value(2)).unwrap();
        let advance = session.record_answer("a2", value(2)).unwrap().unwrap();
        assert_eq!(advance.to, Cursor { category: 1, question: 1 });
        assert_eq!(advance.delay, Duration::from_millis(500));
    }

    #[test]
    fn last_question_of_last_category_does_not_advance() {
        let mut session = loaded(&[]);
        assert_eq!(session.record_answer("b3", value(1)).unwrap(), None);
    }

    #[test]
    fn completes_when_every_question_is_answered() {
        let mut session = loaded(&["a1", "a2", "b1", "b2"]);
        assert!(matches!(session.state(), SessionState::InProgress { .. }));

        session.record_answer("b3", AnswerValue::NOT_APPLICABLE).unwrap();
        assert_eq!(session.state(), SessionState::Complete);

        session.record_answer("a1", value(6)).unwrap();
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.answers()["a1"].get(), 6);
    }

    #[test]
    fn unknown_question_is_not_found() {
        let mut session = loaded(&[]);
        assert!(matches!(
            session.record_answer("zz", value(1)),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn custom_policy_delays_are_used() {
        let mut session = AssessmentSession::new(AdvancePolicy {
            question_delay: Duration::from_millis(10),
            category_delay: Duration::from_millis(20),
        });
        session.load(&questions(), AnswerMap::new()).unwrap();
        assert_eq!(
            session.record_answer("a1", value(1)).unwrap().unwrap().delay,
            Duration::from_millis(10)
        );
        assert_eq!(
            session.record_answer("a2", value(1)).unwrap().unwrap().delay,
            Duration::from_millis(20)
        );
    }

    #[test]
    fn open_category_and_first_unanswered() {
        let mut session = loaded(&["a1", "b1"]);
        assert_eq!(session.open_category(1).unwrap(), Cursor { category: 1, question: 1 });
        assert!(session.open_category(5).is_err());

        let (cursor, q) = session.first_unanswered().unwrap();
        assert_eq!(cursor, Cursor { category: 0, question: 1 });
        assert_eq!(q.question_id, "a2");
        assert_eq!(session.category_progress(1).unwrap().answered, 1);
    }
}
