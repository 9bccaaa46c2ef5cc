//! Exit readiness assessment.

use exw_core::assessment::{
    Assessment, AssessmentSnapshot, AssessmentTask, Question, SaveResponseRequest, SavedResponse,
    StartedAssessment,
};
use serde::{Deserialize, Serialize};

use crate::{ApiClient, error::ApiError};

#[derive(Deserialize)]
struct QuestionsResponse {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct StartResponse {
    assessment: StartedAssessment,
}

#[derive(Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    history: Vec<AssessmentSnapshot>,
}

#[derive(Deserialize)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<AssessmentTask>,
}

#[derive(Serialize)]
struct TaskStatusRequest<'a> {
    status: &'a str,
}

#[derive(Deserialize)]
struct TaskStatusResponse {
    task: TaskStatus,
}

/// Acknowledged task status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: i64,
    pub status: String,
    #[serde(default)]
    pub title: String,
}

impl ApiClient {
    /// The user's current assessment with its responses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn current_assessment(&self) -> Result<Assessment, ApiError> {
        self.get("/assessment/current").await
    }

    /// Every assessment question in served order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn assessment_questions(&self) -> Result<Vec<Question>, ApiError> {
        let resp: QuestionsResponse = self.get("/assessment/questions").await?;
        Ok(resp.questions)
    }

    /// Start a new assessment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn start_assessment(&self) -> Result<StartedAssessment, ApiError> {
        let resp: StartResponse = self.post("/assessment/start", &serde_json::json!({})).await?;
        Ok(resp.assessment)
    }

    /// Start over; earlier assessments stay in the history.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn retake_assessment(&self) -> Result<StartedAssessment, ApiError> {
        let resp: StartResponse = self.post("/assessment/retake", &serde_json::json!({})).await?;
        Ok(resp.assessment)
    }

    /// Past assessments with their category scores.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn assessment_history(&self) -> Result<Vec<AssessmentSnapshot>, ApiError> {
        let resp: HistoryResponse = self.get("/assessment/history").await?;
        Ok(resp.history)
    }

    /// One assessment with its responses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 404 for an unknown id.
    pub async fn assessment(&self, id: i64) -> Result<AssessmentSnapshot, ApiError> {
        self.get(&format!("/assessment/{id}")).await
    }

    /// Save (or overwrite) the answer to one question.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn save_response(&self, request: &SaveResponseRequest) -> Result<SavedResponse, ApiError> {
        tracing::debug!(question = %request.question_id, "saving assessment response");
        self.post("/assessment/response", request).await
    }

    /// Follow-up tasks of the current assessment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn assessment_tasks(&self) -> Result<Vec<AssessmentTask>, ApiError> {
        let resp: TasksResponse = self.get("/assessment/tasks").await?;
        Ok(resp.tasks)
    }

    /// Change a task's status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn update_task_status(&self, task_id: i64, status: &str) -> Result<TaskStatus, ApiError> {
        let resp: TaskStatusResponse = self
            .put(
                &format!("/assessment/task/{task_id}/status"),
                &TaskStatusRequest { status },
            )
            .await?;
        Ok(resp.task)
    }
}
