use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Valuation commands. Financials are edited in a local draft until submitted.
#[derive(Clone, Debug, Subcommand)]
pub enum ValuationCommands {
    /// Set one financial value and recompute totals.
    Set(ValuationSetArgs),
    /// Read `<field> <year> <value>` lines from stdin and save the draft once input settles.
    Edit,
    /// Show the draft.
    Show,
    /// Financial ratios per year.
    Ratios(ValuationRatiosArgs),
    /// Gross profit, EBITDA and SDE per year.
    Trend,
    /// Change the industry or private company discount.
    Settings(ValuationSettingsArgs),
    /// List industries and their multiples.
    Industries,
    /// Run the multi-year valuation on the draft.
    Submit,
    /// Single-period valuation from a JSON request file.
    Quick(ValuationQuickArgs),
    /// Past valuations.
    History,
    /// One past valuation.
    Get(ValuationIdArgs),
    /// Archive a past valuation.
    Archive(ValuationIdArgs),
    /// Discard the draft.
    Reset,
}

#[derive(Clone, Debug, Args)]
pub struct ValuationSetArgs {
    /// Field name (e.g. revenue, ebitda, owner_salary).
    pub field: String,
    /// Fiscal year.
    pub year: i32,
    /// Amount; blank or non-numeric counts as 0.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Clone, Debug, Args)]
pub struct ValuationRatiosArgs {
    /// Only this year.
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Clone, Debug, Args)]
pub struct ValuationSettingsArgs {
    /// Industry id; an empty string clears it.
    #[arg(long)]
    pub industry: Option<String>,
    /// Private company discount, in percent (0-50).
    #[arg(long)]
    pub discount: Option<f64>,
}

#[derive(Clone, Debug, Args)]
pub struct ValuationQuickArgs {
    /// JSON file with the request body; `-` reads stdin.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ValuationIdArgs {
    pub id: i64,
}
