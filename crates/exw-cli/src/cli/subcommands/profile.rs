use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Business profile commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the profile, or one section of it.
    Show(ProfileShowArgs),
    /// Save the profile, or one section of it, from a JSON file.
    Save(ProfileSaveArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ProfileShowArgs {
    #[arg(long)]
    pub section: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ProfileSaveArgs {
    /// JSON file; `-` reads stdin.
    pub file: PathBuf,
    /// Only merge this section (client, spouse, dependents, business, ...).
    #[arg(long)]
    pub section: Option<String>,
}
