mod draft;
mod edit;
mod remote;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ValuationCommands;
use crate::context::AppContext;

/// Handle `exw valuation <subcommand>`.
pub async fn handle(action: &ValuationCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ValuationCommands::Set(args) => draft::set(args, ctx, flags),
        ValuationCommands::Edit => edit::run(ctx, flags).await,
        ValuationCommands::Show => draft::show(ctx, flags),
        ValuationCommands::Ratios(args) => draft::ratios(args, ctx, flags),
        ValuationCommands::Trend => draft::trend(ctx, flags),
        ValuationCommands::Settings(args) => draft::settings(args, ctx, flags),
        ValuationCommands::Reset => draft::reset(ctx, flags),
        ValuationCommands::Industries => remote::industries(ctx, flags).await,
        ValuationCommands::Submit => remote::submit(ctx, flags).await,
        ValuationCommands::Quick(args) => remote::quick(args, ctx, flags).await,
        ValuationCommands::History => remote::history(ctx, flags).await,
        ValuationCommands::Get(args) => remote::get(args.id, ctx, flags).await,
        ValuationCommands::Archive(args) => remote::archive(args.id, ctx, flags).await,
    }
}
