use exw_core::CoreError;
use exw_core::assessment::{AnswerValue, AssessmentTotals, Progress, SaveResponseRequest, SessionState};
use serde::Serialize;

use super::session::{QuestionView, load};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::assessment::AssessmentAnswerArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SavedAnswer {
    question_id: String,
    answer_value: u8,
    answer_text: String,
    score: Option<f64>,
}

#[derive(Serialize)]
struct AnswerResponse {
    saved: SavedAnswer,
    totals: AssessmentTotals,
    #[serde(flatten)]
    state: SessionState,
    progress: Progress,
    next: Option<QuestionView>,
}

/// Save one answer, then advance the way the questionnaire does: the next
/// question of the category after the question delay, or the next category
/// after the category delay.
pub async fn handle(args: &AssessmentAnswerArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let value = AnswerValue::new(args.value)?;
    let mut loaded = load(ctx).await?;
    let question = loaded
        .session
        .question(&args.question_id)
        .cloned()
        .ok_or_else(|| CoreError::NotFound {
            entity_type: "question".to_string(),
            id: args.question_id.clone(),
        })?;

    let request = SaveResponseRequest::new(
        Some(loaded.assessment.id),
        &question,
        value,
        args.comments.clone(),
    );
    let saved = ctx.api.save_response(&request).await?;

    if let Some(advance) = loaded.session.record_answer(&question.question_id, value)? {
        tokio::time::sleep(advance.delay).await;
        loaded.session.apply_advance(advance);
    }

    let session = &loaded.session;
    let next = match session.state() {
        SessionState::Complete => None,
        _ => session
            .current_question()
            .filter(|q| !session.answers().contains_key(&q.question_id))
            .or_else(|| session.first_unanswered().map(|(_, q)| q))
            .map(QuestionView::new),
    };

    output(
        &AnswerResponse {
            saved: SavedAnswer {
                question_id: saved.response.question_id,
                answer_value: value.get(),
                answer_text: request.answer_text,
                score: saved.response.score,
            },
            totals: saved.assessment,
            state: session.state(),
            progress: session.progress(),
            next,
        },
        flags.format,
    )
}
