//! Persistence of the in-progress valuation under the three
//! `advancedValuation*` keys.

use std::sync::Arc;

use exw_core::financials::FinancialRecord;
use exw_core::valuation::ValuationDraft;
use serde_json::Value;

use crate::error::StoreError;
use crate::keys;
use crate::repository::{Repository, RepositoryExt};

/// Typed view of the valuation draft keys.
#[derive(Clone)]
pub struct ValuationDraftStore {
    repo: Arc<dyn Repository>,
}

impl ValuationDraftStore {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Restore the draft for the fiscal years ending at `current_year`.
    ///
    /// A key whose stored value cannot be read as expected is treated as
    /// absent, with a warning, so one bad key never blocks the rest.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only when the backing store itself fails.
    pub fn load(&self, current_year: i32) -> Result<ValuationDraft, StoreError> {
        let record = match self.repo.load::<FinancialRecord>(keys::ADVANCED_VALUATION_DATA) {
            Ok(record) => record,
            Err(StoreError::Serialization(error)) => {
                tracing::warn!(%error, "ignoring unreadable saved valuation data");
                None
            }
            Err(e) => return Err(e),
        };
        let industry = self
            .repo
            .load_value(keys::ADVANCED_VALUATION_INDUSTRY)?
            .and_then(|v| as_text(&v));
        let discount = self
            .repo
            .load_value(keys::ADVANCED_VALUATION_DISCOUNT)?
            .and_then(|v| as_number(&v));

        Ok(ValuationDraft::restore(
            record.as_ref(),
            industry,
            discount,
            current_year,
        ))
    }

    /// Persist all three parts of `draft`. An unset industry removes its key.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError` hit; earlier keys stay written.
    pub fn save(&self, draft: &ValuationDraft) -> Result<(), StoreError> {
        self.repo
            .save(keys::ADVANCED_VALUATION_DATA, &draft.financials)?;
        match &draft.industry_id {
            Some(id) => self.repo.save(keys::ADVANCED_VALUATION_INDUSTRY, id)?,
            None => self.repo.remove(keys::ADVANCED_VALUATION_INDUSTRY)?,
        }
        self.repo
            .save(keys::ADVANCED_VALUATION_DISCOUNT, &draft.private_discount_pct)
    }

    /// Forget the draft.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a key cannot be removed.
    pub fn clear(&self) -> Result<(), StoreError> {
        for key in [
            keys::ADVANCED_VALUATION_DATA,
            keys::ADVANCED_VALUATION_INDUSTRY,
            keys::ADVANCED_VALUATION_DISCOUNT,
        ] {
            self.repo.remove(key)?;
        }
        Ok(())
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
