use std::sync::Arc;

use anyhow::Context;
use exw_auth::AuthProvider;
use exw_client::ApiClient;
use exw_config::ExwConfig;
use exw_core::assessment::AdvancePolicy;
use exw_store::{FileStore, Repository, ValuationDraftStore};

use crate::cli::GlobalFlags;

/// Shared client resources initialized once at startup.
pub struct AppContext {
    pub config: ExwConfig,
    pub repo: Arc<dyn Repository>,
    pub auth: Arc<dyn AuthProvider>,
    pub api: ApiClient,
    pub drafts: ValuationDraftStore,
}

impl AppContext {
    /// Open the state directory and build the auth provider and API client.
    ///
    /// `--store` points state at another directory and keeps the token
    /// there instead of the OS keyring.
    pub fn init(config: ExwConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let (dir, use_keyring) = flags
            .store
            .clone()
            .map_or_else(|| (config.storage.resolved_dir(), true), |dir| (dir, false));
        tracing::debug!(dir = %dir.display(), use_keyring, "client state");

        let repo: Arc<dyn Repository> = Arc::new(FileStore::new(dir));
        let auth = exw_auth::provider_from_config(&config, Arc::clone(&repo), use_keyring)
            .context("failed to set up authentication")?;
        let api = ApiClient::new(&config.api, Arc::clone(&auth))?;
        let drafts = ValuationDraftStore::new(Arc::clone(&repo));

        Ok(Self {
            config,
            repo,
            auth,
            api,
            drafts,
        })
    }

    /// Auto-advance delays from config.
    #[must_use]
    pub fn advance_policy(&self) -> AdvancePolicy {
        AdvancePolicy {
            question_delay: self.config.timing.advance_question(),
            category_delay: self.config.timing.advance_category(),
        }
    }
}
