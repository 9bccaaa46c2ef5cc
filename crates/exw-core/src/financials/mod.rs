//! Multi-year financial input: the record, lenient amount parsing, derived
//! totals, ratios and trend series.

mod amount;
pub mod fields;
mod ratios;
mod record;
mod totals;

pub use amount::{format_amount, parse_amount};
pub use ratios::{FinancialRatios, TrendPoint, ratios, ratios_for_year, trend};
pub use record::FinancialRecord;
pub use totals::{FORMULAS, Formula, balance_difference, recompute, recompute_in_place};
