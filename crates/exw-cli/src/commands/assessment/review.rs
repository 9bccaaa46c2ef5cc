use exw_core::assessment::{AssessmentResponse, GapZone, category_display_name, group_by_zone};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::assessment::AssessmentTaskArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct GapRow {
    zone: GapZone,
    label: &'static str,
    range: &'static str,
    question_id: String,
    category: String,
    subject: Option<String>,
    score: f64,
}

/// Answered responses, worst zone last, N/A at the end.
fn gap_rows(responses: &[AssessmentResponse]) -> Vec<GapRow> {
    let answered: Vec<AssessmentResponse> = responses
        .iter()
        .filter(|r| r.answer_value.is_some())
        .cloned()
        .collect();
    group_by_zone(&answered)
        .into_iter()
        .flat_map(|(zone, members)| {
            members.into_iter().map(move |response| GapRow {
                zone,
                label: zone.label(),
                range: zone.range(),
                question_id: response.question_id.clone(),
                category: response
                    .category
                    .as_deref()
                    .map(|key| category_display_name(key).unwrap_or(key).to_string())
                    .unwrap_or_default(),
                subject: response.subject.clone(),
                score: response.score.unwrap_or(0.0),
            })
        })
        .collect()
}

pub async fn gaps(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let assessment = ctx.api.current_assessment().await?;
    output(&gap_rows(&assessment.responses), flags.format)
}

pub async fn retake(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.api.retake_assessment().await?, flags.format)
}

pub async fn history(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.api.assessment_history().await?, flags.format)
}

pub async fn view(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.api.assessment(id).await?, flags.format)
}

pub async fn tasks(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.api.assessment_tasks().await?, flags.format)
}

pub async fn task_status(args: &AssessmentTaskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = args.status.trim();
    if status.is_empty() {
        anyhow::bail!("assessment task: status must not be empty");
    }
    output(&ctx.api.update_task_status(args.id, status).await?, flags.format)
}
