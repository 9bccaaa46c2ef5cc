use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Exit strategy quiz commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuizCommands {
    /// List the questions and their options.
    Questions,
    /// Submit answers from a JSON file (`{"Q1": "max_price", ...}`).
    Submit(QuizSubmitArgs),
    /// The latest recommendations.
    Results,
    /// Past quiz results.
    History,
    /// Every exit strategy.
    Strategies,
}

#[derive(Clone, Debug, Args)]
pub struct QuizSubmitArgs {
    /// JSON file; `-` reads stdin.
    pub file: PathBuf,
}
