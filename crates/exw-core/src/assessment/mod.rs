//! The scored readiness assessment ("gap analysis").
//!
//! Questions come from the backend and are grouped by category in the order
//! they are served. Answers use a 0–6 scale where 0 is N/A. The backend
//! scores responses; this module tracks progress, decides where the user
//! goes after each saved answer, and summarizes scores into gap zones.

mod answer;
mod gaps;
mod progress;
mod question;
mod response;
mod session;

pub use answer::{AnswerMap, AnswerScale, AnswerValue};
pub use gaps::{
    GapZone, SCORED_CATEGORIES, category_display_name, category_means, effective_category_scores,
    group_by_zone,
};
pub use progress::{Progress, next_unanswered, progress};
pub use question::{Category, Question, group_by_category};
pub use response::{
    Assessment, AssessmentResponse, AssessmentSnapshot, AssessmentTask, AssessmentTotals,
    SaveResponseRequest, SavedResponse, SavedResponseRow, StartedAssessment,
};
pub use session::{
    Advance, AdvancePolicy, AssessmentSession, Cursor, DEFAULT_CATEGORY_DELAY,
    DEFAULT_QUESTION_DELAY, SessionState,
};
