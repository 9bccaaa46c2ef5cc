//! Exit strategy quiz.

use exw_core::quiz::{
    QuizHistoryEntry, QuizQuestions, QuizResult, QuizSubmission, Strategies,
};
use serde::Deserialize;

use crate::{ApiClient, error::ApiError};

#[derive(Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    history: Vec<QuizHistoryEntry>,
}

/// Endpoint prefix of the quiz resource.
const PREFIX: &str = "/exit-quiz";

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn quiz_questions(&self) -> Result<QuizQuestions, ApiError> {
        self.get(&format!("{PREFIX}/questions")).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn quiz_strategies(&self) -> Result<Strategies, ApiError> {
        self.get(&format!("{PREFIX}/strategies")).await
    }

    /// Submit a complete set of answers and get ranked recommendations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] (400) when answers are missing.
    pub async fn submit_quiz(&self, submission: &QuizSubmission) -> Result<QuizResult, ApiError> {
        tracing::debug!(answers = submission.responses.len(), "submitting exit quiz");
        self.post(&format!("{PREFIX}/submit"), submission).await
    }

    /// The latest result, or `None` when the quiz was never taken.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status (other than 404) or parse
    /// failure.
    pub async fn quiz_results(&self) -> Result<Option<QuizResult>, ApiError> {
        match self.get(&format!("{PREFIX}/results")).await {
            Ok(result) => Ok(Some(result)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn quiz_history(&self) -> Result<Vec<QuizHistoryEntry>, ApiError> {
        let resp: HistoryResponse = self.get(&format!("{PREFIX}/history")).await?;
        Ok(resp.history)
    }
}
