//! Business profile.

use exw_core::CoreError;
use exw_core::profile::{BusinessProfile, ProfileSection};
use serde::Deserialize;
use serde_json::Value;

use crate::{ApiClient, error::ApiError};

#[derive(Deserialize)]
struct ProfileResponse {
    profile: BusinessProfile,
}

impl ApiClient {
    /// The saved profile, or `None` when the user has not created one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status (other than 404) or parse
    /// failure.
    pub async fn business_profile(&self) -> Result<Option<BusinessProfile>, ApiError> {
        match self.get::<ProfileResponse>("/business/profile").await {
            Ok(resp) => Ok(Some(resp.profile)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create or replace the profile. The backend requires `business_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure.
    pub async fn save_business_profile(&self, profile: &BusinessProfile) -> Result<BusinessProfile, ApiError> {
        let resp: ProfileResponse = self.post("/business/profile", profile).await?;
        Ok(resp.profile)
    }

    /// Save one section: fetch the current profile, merge `patch` into
    /// `section`, and send the whole profile back.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] when `patch` does not fit the section, or
    /// any error of the fetch and save calls.
    pub async fn save_profile_section(
        &self,
        section: ProfileSection,
        patch: &Value,
    ) -> Result<BusinessProfile, ApiError> {
        let mut profile = self.business_profile().await?.unwrap_or_default();
        profile
            .apply_section(section, patch)
            .map_err(|err: CoreError| ApiError::Parse(err.to_string()))?;
        self.save_business_profile(&profile).await
    }
}
