//! Valuation drafts, industry multiples and valuation history.
//!
//! The valuation formulas themselves run on the backend; this module only
//! shapes what is sent and what comes back.

mod draft;
mod history;
mod industry;

pub use draft::{
    DEFAULT_DISCOUNT_PCT, FISCAL_YEARS, MAX_DISCOUNT_PCT, ValuationDraft, current_year,
    fiscal_years,
};
pub use history::{
    QuickValuationRequest, QuickValuationResult, ValuationHistoryEntry, ValuationKind,
    ValuationMethod,
};
pub use industry::{Industry, MultipleRange};
