use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Valuation { action } => commands::valuation::handle(&action, ctx, flags).await,
        Commands::Assessment { action } => commands::assessment::handle(&action, ctx, flags).await,
        Commands::Profile { action } => commands::profile::handle(&action, ctx, flags).await,
        Commands::WealthGap { action } => commands::wealth_gap::handle(&action, ctx, flags).await,
        Commands::Quiz { action } => commands::quiz::handle(&action, ctx, flags).await,
    }
}
