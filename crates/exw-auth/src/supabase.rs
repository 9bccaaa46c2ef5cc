//! Supabase email/password sign-in.

use std::time::Duration;

use exw_config::{AuthProviderKind, SupabaseConfig};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AuthError;
use crate::provider::{AuthFuture, AuthProvider, http_client, read_json};
use crate::session::{
    AuthUser, Credentials, RegisterOutcome, Registration, Session, SessionStatus, SessionStore,
};

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Value,
}

impl From<SupabaseUser> for AuthUser {
    fn from(user: SupabaseUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user
                .user_metadata
                .get("full_name")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            subscription_tier: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseSession {
    access_token: String,
    user: SupabaseUser,
}

pub struct SupabaseProvider {
    http: reqwest::Client,
    url: String,
    anon_key: String,
    sessions: SessionStore,
}

impl SupabaseProvider {
    /// # Errors
    ///
    /// `ProviderError` if the config is incomplete or the HTTP client cannot be built.
    pub fn new(config: &SupabaseConfig, timeout: Duration, sessions: SessionStore) -> Result<Self, AuthError> {
        if !config.is_configured() {
            return Err(AuthError::ProviderError(
                "supabase.url and supabase.anon_key must be set".into(),
            ));
        }
        Ok(Self {
            http: http_client(timeout)?,
            url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            sessions,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, AuthError> {
        let url = format!("{}/auth/v1{path}", self.url);
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::ProviderError(format!("{url}: {e}")))?;
        read_json(response, &[400, 401, 422]).await
    }
}

impl AuthProvider for SupabaseProvider {
    fn kind(&self) -> AuthProviderKind {
        AuthProviderKind::Supabase
    }

    fn login<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, Session> {
        Box::pin(async move {
            let body = self
                .post(
                    "/token?grant_type=password",
                    &json!({"email": credentials.email, "password": credentials.password}),
                )
                .await?;
            let parsed: SupabaseSession = serde_json::from_value(body)
                .map_err(|e| AuthError::ProviderError(format!("unexpected token response: {e}")))?;
            let session = Session::new(parsed.access_token, parsed.user.into());
            self.sessions.save(&session)?;
            Ok(session)
        })
    }

    fn register<'a>(&'a self, registration: &'a Registration) -> AuthFuture<'a, RegisterOutcome> {
        Box::pin(async move {
            let body = self
                .post(
                    "/signup",
                    &json!({
                        "email": registration.email,
                        "password": registration.password,
                        "data": {"full_name": registration.full_name},
                    }),
                )
                .await?;

            // Without auto-confirm the response is the bare user.
            if body.get("access_token").is_none() {
                return Ok(RegisterOutcome::ConfirmationPending {
                    email: registration.email.clone(),
                });
            }
            let parsed: SupabaseSession = serde_json::from_value(body)
                .map_err(|e| AuthError::ProviderError(format!("unexpected signup response: {e}")))?;
            let session = Session::new(parsed.access_token, parsed.user.into());
            self.sessions.save(&session)?;
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
