use exw_core::quiz::{QuizQuestion, QuizResponses, QuizSubmission, answer, quiz_progress};
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuizCommands;
use crate::cli::subcommands::quiz::QuizSubmitArgs;
use crate::commands::shared::input::read_json;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Handle `exw quiz <subcommand>`.
pub async fn handle(action: &QuizCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        QuizCommands::Questions => output(&ctx.api.quiz_questions().await?, flags.format),
        QuizCommands::Submit(args) => submit(args, ctx, flags).await,
        QuizCommands::Results => results(ctx, flags).await,
        QuizCommands::History => output(&ctx.api.quiz_history().await?, flags.format),
        QuizCommands::Strategies => output(&ctx.api.quiz_strategies().await?, flags.format),
    }
}

/// Check every answer against the served questions and require all of them.
fn validate(questions: &[QuizQuestion], raw: &QuizResponses) -> anyhow::Result<QuizResponses> {
    let mut responses = QuizResponses::new();
    for (question_id, value) in raw {
        answer(questions, &mut responses, question_id, value.trim())?;
    }
    let progress = quiz_progress(questions, &responses);
    if !progress.can_submit() {
        anyhow::bail!(
            "quiz submit: {} of {} questions answered; missing {}",
            progress.answered,
            progress.total,
            progress.unanswered.join(", ")
        );
    }
    Ok(responses)
}

async fn submit(args: &QuizSubmitArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw: QuizResponses = read_json(&args.file)?;
    let questions = ctx.api.quiz_questions().await?.questions;
    let responses = validate(&questions, &raw)?;
    let result = ctx.api.submit_quiz(&QuizSubmission { responses }).await?;
    output(&result, flags.format)
}

async fn results(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(result) = ctx.api.quiz_results().await? else {
        ui::note("no quiz results yet; see `exw quiz submit <file>`");
        return output(&Value::Null, flags.format);
    };
    if let Some(top) = result.top() {
        tracing::debug!(top = %top.key, score = top.score, "latest quiz result");
    }
    output(&result, flags.format)
}
