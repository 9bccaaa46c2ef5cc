//! Wealth gap.

use exw_core::wealth_gap::{SavedWealthGap, WealthGap, WealthGapCalculation};
use serde::Deserialize;

use crate::{ApiClient, error::ApiError};

#[derive(Deserialize)]
struct WealthGapResponse {
    #[serde(default)]
    wealth_gap: Option<SavedWealthGap>,
}

/// Endpoint prefix of the wealth gap resource.
const PREFIX: &str = "/wealth-gap";

impl ApiClient {
    /// The saved wealth gap, or `None` when none exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn wealth_gap(&self) -> Result<Option<SavedWealthGap>, ApiError> {
        let resp: WealthGapResponse = self.get(PREFIX).await?;
        Ok(resp.wealth_gap)
    }

    /// Save the inputs. Net worth is derived from the components first when
    /// any were given.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if the server acknowledges without a record.
    pub async fn save_wealth_gap(&self, inputs: &WealthGap) -> Result<SavedWealthGap, ApiError> {
        let mut inputs = inputs.clone();
        inputs.derive_net_worth();
        let resp: WealthGapResponse = self.post(PREFIX, &inputs).await?;
        resp.wealth_gap
            .ok_or_else(|| ApiError::Parse("response has no wealth_gap".to_string()))
    }

    /// Server-side calculation without saving.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn calculate_wealth_gap(&self, inputs: &WealthGap) -> Result<WealthGapCalculation, ApiError> {
        let mut inputs = inputs.clone();
        inputs.derive_net_worth();
        self.post(&format!("{PREFIX}/calculate"), &inputs).await
    }
}
