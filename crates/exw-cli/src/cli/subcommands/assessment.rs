use clap::{Args, Subcommand};

/// Assessment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssessmentCommands {
    /// Progress and scores of the current assessment.
    Status,
    /// Answer a question (0 = N/A, 1-6).
    Answer(AssessmentAnswerArgs),
    /// The next unanswered question.
    Next,
    /// Answered questions grouped by gap zone.
    Gaps,
    /// Start a fresh assessment.
    Retake,
    /// Past assessments.
    History,
    /// One past assessment.
    View(AssessmentViewArgs),
    /// Follow-up tasks.
    Tasks,
    /// Change a task's status.
    Task(AssessmentTaskArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AssessmentAnswerArgs {
    pub question_id: String,
    pub value: i64,
    #[arg(long)]
    pub comments: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AssessmentViewArgs {
    pub id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct AssessmentTaskArgs {
    pub id: i64,
    /// New status (e.g. in_progress, completed).
    pub status: String,
}
