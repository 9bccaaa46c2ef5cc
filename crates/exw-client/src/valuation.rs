//! Industries and valuations.

use exw_core::valuation::{Industry, QuickValuationRequest, QuickValuationResult, ValuationHistoryEntry};
use serde::Deserialize;
use serde_json::Value;

use crate::{ApiClient, error::ApiError};

#[derive(Deserialize)]
struct IndustriesResponse {
    industries: Vec<Industry>,
}

#[derive(Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    valuations: Vec<ValuationHistoryEntry>,
}

#[derive(Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

impl ApiClient {
    /// All industries with their valuation multiples.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn industries(&self) -> Result<Vec<Industry>, ApiError> {
        let resp: IndustriesResponse = self.get("/valuation/industries").await?;
        Ok(resp.industries)
    }

    /// A single industry by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn industry(&self, id: i64) -> Result<Industry, ApiError> {
        self.get(&format!("/valuation/industry/{id}")).await
    }

    /// Single-period valuation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn quick_valuation(
        &self,
        request: &QuickValuationRequest,
    ) -> Result<QuickValuationResult, ApiError> {
        self.post("/valuation/calculate", request).await
    }

    /// Multi-year valuation of a draft submission
    /// ([`exw_core::valuation::ValuationDraft::submission`]).
    ///
    /// The result is passed through as returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn advanced_valuation(&self, submission: &Value) -> Result<Value, ApiError> {
        self.post("/valuation/advanced", submission).await
    }

    /// Past valuations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn valuation_history(&self) -> Result<Vec<ValuationHistoryEntry>, ApiError> {
        let resp: HistoryResponse = self.get("/valuation/history").await?;
        Ok(resp.valuations)
    }

    /// Full record of a past valuation with its inputs and calculation details.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn valuation(&self, id: i64) -> Result<Value, ApiError> {
        self.get(&format!("/valuation/{id}")).await
    }

    /// Archive a valuation. Returns the server's acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn archive_valuation(&self, id: i64) -> Result<String, ApiError> {
        let resp: MessageResponse = self.delete(&format!("/valuation/{id}")).await?;
        Ok(resp.message)
    }
}
