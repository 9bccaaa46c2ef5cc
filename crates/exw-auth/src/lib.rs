//! # exw-auth
//!
//! Pluggable authentication for the Exitwise client.
//!
//! [`AuthProvider`] is the one capability the API client depends on. Two
//! backends implement it: [`LegacyTokenProvider`] (the planning backend's
//! own login) and [`SupabaseProvider`]. The active one is chosen from
//! `auth.provider` in the configuration. Both persist the session through
//! [`SessionStore`]: token in the OS keyring with the repository as fallback,
//! user profile in the repository.

pub mod error;
pub mod expiry;
mod legacy;
mod provider;
mod session;
mod supabase;
pub mod token_store;

use std::sync::Arc;

use exw_config::{AuthProviderKind, ExwConfig};
use exw_store::Repository;

pub use error::AuthError;
pub use legacy::LegacyTokenProvider;
pub use provider::{AuthFuture, AuthProvider};
pub use session::{
    AuthUser, Credentials, RegisterOutcome, Registration, Session, SessionStatus, SessionStore,
};
pub use supabase::SupabaseProvider;
pub use token_store::{TokenSource, TokenStore};

/// Build the provider selected by `config.auth.provider`.
///
/// `use_keyring = false` keeps the token in `repo` only.
///
/// # Errors
///
/// `ProviderError` when the selected provider is not configured or its HTTP
/// client cannot be built.
pub fn provider_from_config(
    config: &ExwConfig,
    repo: Arc<dyn Repository>,
    use_keyring: bool,
) -> Result<Arc<dyn AuthProvider>, AuthError> {
    let tokens = if use_keyring {
        TokenStore::new(repo.clone())
    } else {
        TokenStore::without_keyring(repo.clone())
    };
    let sessions = SessionStore::new(tokens, repo);
    let timeout = config.api.timeout();

    tracing::debug!(provider = %config.auth.provider, "auth provider selected");
    Ok(match config.auth.provider {
        AuthProviderKind::Legacy => Arc::new(LegacyTokenProvider::new(
            config.api.base(),
            timeout,
            sessions,
        )?),
        AuthProviderKind::Supabase => {
            Arc::new(SupabaseProvider::new(&config.supabase, timeout, sessions)?)
        }
    })
}
