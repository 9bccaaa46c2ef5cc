//! The in-progress advanced valuation.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::financials::{self, FinancialRecord, fields};

/// Number of fiscal years collected, ending at the current year.
pub const FISCAL_YEARS: usize = 4;

/// Default private company discount, in percent.
pub const DEFAULT_DISCOUNT_PCT: f64 = 25.0;

/// Upper bound of the private company discount, in percent.
pub const MAX_DISCOUNT_PCT: f64 = 50.0;

/// Calendar year in local time; the last fiscal year of a new draft.
#[must_use]
pub fn current_year() -> i32 {
    Local::now().year()
}

/// The four fiscal years ending at `current_year`, oldest first.
#[must_use]
pub const fn fiscal_years(current_year: i32) -> [i32; FISCAL_YEARS] {
    [current_year - 3, current_year - 2, current_year - 1, current_year]
}

/// Financial record plus valuation settings, edited locally until submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationDraft {
    pub financials: FinancialRecord,
    pub industry_id: Option<String>,
    pub private_discount_pct: f64,
}

impl ValuationDraft {
    /// An empty draft for the fiscal years ending at `current_year`.
    #[must_use]
    pub fn new(current_year: i32) -> Self {
        Self {
            financials: FinancialRecord::blank(&fiscal_years(current_year)),
            industry_id: None,
            private_discount_pct: DEFAULT_DISCOUNT_PCT,
        }
    }

    /// Rebuild a draft from saved parts.
    ///
    /// The saved record is merged into the complete field shape for the
    /// current fiscal years and recomputed, so stale totals or fields from
    /// older saves never leak into a submission.
    #[must_use]
    pub fn restore(
        saved: Option<&FinancialRecord>,
        industry_id: Option<String>,
        private_discount_pct: Option<f64>,
        current_year: i32,
    ) -> Self {
        let years = fiscal_years(current_year);
        let mut financials = saved.map_or_else(
            || FinancialRecord::blank(&years),
            |record| record.conform_to(&years),
        );
        financials::recompute_in_place(&mut financials);

        Self {
            financials,
            industry_id: industry_id.filter(|id| !id.trim().is_empty()),
            private_discount_pct: private_discount_pct
                .filter(|pct| (0.0..=MAX_DISCOUNT_PCT).contains(pct))
                .unwrap_or(DEFAULT_DISCOUNT_PCT),
        }
    }

    /// Years covered by the draft, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.financials.years().into_iter().collect()
    }

    /// Set one entered value and recompute the derived totals.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for unknown or computed fields and
    /// for years outside the draft.
    pub fn set_input(&mut self, field: &str, year: i32, value: &str) -> Result<(), CoreError> {
        if !fields::is_known(field) {
            return Err(CoreError::Validation(format!("unknown financial field '{field}'")));
        }
        if fields::is_derived(field) {
            return Err(CoreError::Validation(format!(
                "'{field}' is computed from other fields and cannot be set"
            )));
        }
        if !self.financials.years().contains(&year) {
            return Err(CoreError::Validation(format!(
                "year {year} is outside the draft ({})",
                self.years()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        self.financials.set(field, year, value.trim());
        financials::recompute_in_place(&mut self.financials);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `pct` is outside `0..=50`.
    pub fn set_discount(&mut self, pct: f64) -> Result<(), CoreError> {
        if !(0.0..=MAX_DISCOUNT_PCT).contains(&pct) {
            return Err(CoreError::Validation(format!(
                "private company discount must be between 0 and {MAX_DISCOUNT_PCT}, got {pct}"
            )));
        }
        self.private_discount_pct = pct;
        Ok(())
    }

    pub fn set_industry(&mut self, industry_id: Option<String>) {
        self.industry_id = industry_id.filter(|id| !id.trim().is_empty());
    }

    /// The JSON body for the advanced valuation endpoint.
    ///
    /// The record is flattened to top-level keys, with `industry_id` and the
    /// discount as a fraction (`25` becomes `0.25`) alongside.
    #[must_use]
    pub fn submission(&self) -> Value {
        let mut body = match serde_json::to_value(&self.financials) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        body.insert(
            "industry_id".to_string(),
            self.industry_id.clone().map_or(Value::Null, Value::String),
        );
        body.insert(
            "private_company_discount".to_string(),
            Value::from(self.private_discount_pct / 100.0),
        );
        Value::Object(body)
    }
}
