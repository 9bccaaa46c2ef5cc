mod answer;
mod review;
mod session;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssessmentCommands;
use crate::context::AppContext;

/// Handle `exw assessment <subcommand>`.
pub async fn handle(action: &AssessmentCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AssessmentCommands::Status => session::status(ctx, flags).await,
        AssessmentCommands::Answer(args) => answer::handle(args, ctx, flags).await,
        AssessmentCommands::Next => session::next(ctx, flags).await,
        AssessmentCommands::Gaps => review::gaps(ctx, flags).await,
        AssessmentCommands::Retake => review::retake(ctx, flags).await,
        AssessmentCommands::History => review::history(ctx, flags).await,
        AssessmentCommands::View(args) => review::view(args.id, ctx, flags).await,
        AssessmentCommands::Tasks => review::tasks(ctx, flags).await,
        AssessmentCommands::Task(args) => review::task_status(args, ctx, flags).await,
    }
}
