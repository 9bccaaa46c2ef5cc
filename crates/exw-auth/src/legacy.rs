//! Token issued by the backend's own `/auth` endpoints.

use std::time::Duration;

use exw_config::AuthProviderKind;
use serde::Deserialize;
use serde_json::json;

use crate::error::AuthError;
use crate::provider::{AuthFuture, AuthProvider, http_client, read_json};
use crate::session::{
    AuthUser, Credentials, RegisterOutcome, Registration, Session, SessionStatus, SessionStore,
};

#[derive(Debug, Deserialize)]
struct LegacyAuthResponse {
    access_token: String,
    #[serde(default)]
    user: AuthUser,
}

pub struct LegacyTokenProvider {
    http: reqwest::Client,
    base_url: String,
    sessions: SessionStore,
}

impl LegacyTokenProvider {
    /// # Errors
    ///
    /// `ProviderError` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, sessions: SessionStore) -> Result<Self, AuthError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            sessions,
        })
    }

    async fn authenticate(&self, path: &str, body: serde_json::Value) -> Result<Session, AuthError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::ProviderError(format!("{url}: {e}")))?;
        // 400 covers "Email already registered" and missing fields.
        let body = read_json(response, &[400, 401]).await?;
        let parsed: LegacyAuthResponse = serde_json::from_value(body)
            .map_err(|e| AuthError::ProviderError(format!("unexpected auth response: {e}")))?;

        let session = Session::new(parsed.access_token, parsed.user);
        self.sessions.save(&session)?;
        Ok(session)
    }
}

impl AuthProvider for LegacyTokenProvider {
    fn kind(&self) -> AuthProviderKind {
        AuthProviderKind::Legacy
    }

    fn login<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, Session> {
        Box::pin(async move {
            self.authenticate(
                "/auth/login",
                json!({"email": credentials.email, "password": credentials.password}),
            )
            .await
        })
    }

    fn register<'a>(&'a self, registration: &'a Registration) -> AuthFuture<'a, RegisterOutcome> {
        Box::pin(async move {
            let session = self
                .authenticate(
                    "/auth/register",
                    json!({
                        "email": registration.email,
                        "password": registration.password,
                        "full_name": registration.full_name,
                    }),
                )
                .await?;
            Ok(RegisterOutcome::SignedIn(session))
        })
    }

    fn token(&self) -> Result<String, AuthError> {
        self.sessions.token()
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.sessions.user()
    }

    fn status(&self) -> SessionStatus {
        self.sessions.status()
    }

    fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear()
    }
}
