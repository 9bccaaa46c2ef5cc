use clap::Subcommand;

use crate::cli::subcommands::{
    AssessmentCommands, AuthCommands, ProfileCommands, QuizCommands, ValuationCommands,
    WealthGapCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign up, sign out.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Multi-year financials and business valuation.
    Valuation {
        #[command(subcommand)]
        action: ValuationCommands,
    },
    /// Exit readiness assessment.
    Assessment {
        #[command(subcommand)]
        action: AssessmentCommands,
    },
    /// Business profile.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Personal wealth gap.
    WealthGap {
        #[command(subcommand)]
        action: WealthGapCommands,
    },
    /// Exit strategy quiz.
    Quiz {
        #[command(subcommand)]
        action: QuizCommands,
    },
}
