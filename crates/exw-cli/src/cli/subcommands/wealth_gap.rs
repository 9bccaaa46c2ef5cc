use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Wealth gap commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WealthGapCommands {
    /// The saved wealth gap.
    Show,
    /// Calculate goal and gap from a JSON input file.
    Calc(WealthGapCalcArgs),
    /// Save inputs from a JSON file.
    Save(WealthGapFileArgs),
}

#[derive(Clone, Debug, Args)]
pub struct WealthGapCalcArgs {
    /// JSON file; `-` reads stdin.
    pub file: PathBuf,
    /// Calculate locally without calling the backend.
    #[arg(long)]
    pub local: bool,
}

#[derive(Clone, Debug, Args)]
pub struct WealthGapFileArgs {
    /// JSON file; `-` reads stdin.
    pub file: PathBuf,
}
