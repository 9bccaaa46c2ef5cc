//! Signed-in session: token plus user, persisted across invocations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use exw_store::{Repository, RepositoryExt, keys};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::expiry::{EXPIRY_BUFFER_SECS, decode_expiry, is_near_expiry};
use crate::token_store::{TokenSource, TokenStore};

/// The signed-in user as reported at login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Integer on the legacy backend, UUID string on Supabase.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub subscription_tier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
    /// From the token's `exp` claim; `None` for opaque tokens.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    #[must_use]
    pub fn new(access_token: String, user: AuthUser) -> Self {
        let expires_at = decode_expiry(&access_token).ok();
        Self {
            access_token,
            user,
            expires_at,
        }
    }
}

/// Result of a sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    SignedIn(Session),
    /// The account exists but the email must be confirmed before login.
    ConfirmationPending { email: String },
}

/// What `exw auth status` reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub source: Option<String>,
    pub user: Option<AuthUser>,
    pub expires_at: Option<DateTime<Utc>>,
    pub expired: bool,
}

/// Token and user persistence shared by the providers.
#[derive(Clone)]
pub struct SessionStore {
    tokens: TokenStore,
    repo: Arc<dyn Repository>,
}

impl SessionStore {
    pub fn new(tokens: TokenStore, repo: Arc<dyn Repository>) -> Self {
        Self { tokens, repo }
    }

    /// Persist a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the token or user cannot be stored.
    pub fn save(&self, session: &Session) -> Result<TokenSource, AuthError> {
        let source = self.tokens.store(&session.access_token)?;
        self.repo.save(keys::USER, &session.user)?;
        tracing::debug!(source = %source, "session stored");
        Ok(source)
    }

    /// The bearer token to send.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` when no token is stored, `TokenExpired` when its
    /// `exp` claim has passed. Opaque tokens are returned as is.
    pub fn token(&self) -> Result<String, AuthError> {
        let (token, _) = self.tokens.load().ok_or(AuthError::NotAuthenticated)?;
        if let Ok(expires_at) = decode_expiry(&token)
            && is_near_expiry(expires_at, EXPIRY_BUFFER_SECS)
        {
            tracing::warn!(%expires_at, "stored token has expired");
            return Err(AuthError::TokenExpired);
        }
        Ok(token)
    }

    #[must_use]
    pub fn user(&self) -> Option<AuthUser> {
        self.repo.load(keys::USER).ok().flatten()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let Some((token, source)) = self.tokens.load() else {
            return SessionStatus {
                authenticated: false,
                source: None,
                user: None,
                expires_at: None,
                expired: false,
            };
        };
        let expires_at = decode_expiry(&token).ok();
        let expired = expires_at.is_some_and(|at| is_near_expiry(at, EXPIRY_BUFFER_SECS));
        SessionStatus {
            authenticated: !expired,
            source: Some(source.to_string()),
            user: self.user(),
            expires_at,
            expired,
        }
    }

    /// Forget token and user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if either cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.tokens.delete()?;
        self.repo.remove(keys::USER)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::make_jwt_with_exp;
    use exw_store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn sessions() -> (Arc<MemoryStore>, SessionStore) {
        let repo = Arc::new(MemoryStore::new());
        let store = SessionStore::new(TokenStore::repository_only(repo.clone()), repo.clone());
        (repo, store)
    }

    fn user() -> AuthUser {
        AuthUser {
            id: Some(serde_json::json!(42)),
            email: Some("owner@example.com".into()),
            full_name: Some("Pat Owner".into()),
            subscription_tier: Some("free".into()),
        }
    }

    #[test]
    fn save_then_token_and_user() {
        let (_, store) = sessions();
        let jwt = make_jwt_with_exp(Utc::now().timestamp() + 3600);
        let session = Session::new(jwt.clone(), user());
        assert!(session.expires_at.is_some());

        store.save(&session).unwrap();
        assert_eq!(store.token().unwrap(), jwt);
        assert_eq!(store.user(), Some(user()));
        assert!(store.status().authenticated);

        store.clear().unwrap();
        assert!(matches!(store.token(), Err(AuthError::NotAuthenticated)));
        assert_eq!(store.user(), None);
    }

    #[test]
    fn expired_token_is_refused() {
        let (_, store) = sessions();
        let jwt = make_jwt_with_exp(Utc::now().timestamp() - 60);
        store.save(&Session::new(jwt, user())).unwrap();

        assert!(matches!(store.token(), Err(AuthError::TokenExpired)));
        let status = store.status();
        assert!(status.expired);
        assert!(!status.authenticated);
        assert_eq!(status.source.as_deref(), Some("store"));
    }

    #[test]
    fn opaque_token_is_accepted() {
        let (_, store) = sessions();
        store
            .save(&Session::new("opaque".into(), AuthUser::default()))
            .unwrap();
        assert_eq!(store.token().unwrap(), "opaque");
        assert_eq!(store.status().expires_at, None);
    }
}
