use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use exw_config::AuthProviderKind;
use serde_json::Value;

use crate::error::AuthError;
use crate::session::{AuthUser, Credentials, RegisterOutcome, Registration, Session, SessionStatus};

pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + Send + 'a>>;

/// Source of bearer tokens for the API client.
///
/// One capability, several backends: the selected provider signs the user
/// in, hands out the current token and forgets the session when the API
/// rejects it.
pub trait AuthProvider: Send + Sync {
    fn kind(&self) -> AuthProviderKind;

    fn login<'a>(&'a self, credentials: &'a Credentials) -> AuthFuture<'a, Session>;

    fn register<'a>(&'a self, registration: &'a Registration) -> AuthFuture<'a, RegisterOutcome>;

    /// Bearer token for the next request.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` or `TokenExpired` when there is no usable token.
    fn token(&self) -> Result<String, AuthError>;

    fn current_user(&self) -> Option<AuthUser>;

    fn status(&self) -> SessionStatus;

    /// Sign out locally.
    ///
    /// # Errors
    ///
    /// `TokenStoreError` if stored credentials cannot be removed.
    fn logout(&self) -> Result<(), AuthError>;

    /// Forced logout after the API answered 401.
    fn invalidate(&self) {
        tracing::warn!(provider = %self.kind(), "API rejected the session token; signing out");
        if let Err(error) = self.logout() {
            tracing::warn!(%error, "failed to clear rejected session");
        }
    }
}

/// HTTP client shared by the providers.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, AuthError> {
    reqwest::Client::builder()
        .user_agent(concat!("exw/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| AuthError::ProviderError(format!("failed to build HTTP client: {e}")))
}

/// Human-readable message from an error body, in the field order the
/// backends use.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|field| body.get(field).and_then(Value::as_str))
        .map(ToString::to_string)
}

/// Read a JSON body, turning non-success statuses into `AuthError`s.
///
/// `rejected` lists statuses that mean the credentials were refused.
pub(crate) async fn read_json(
    response: reqwest::Response,
    rejected: &[u16],
) -> Result<Value, AuthError> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    if status.is_success() {
        return Ok(body);
    }
    let message = error_message(&body).unwrap_or_else(|| status.to_string());
    if rejected.contains(&status.as_u16()) {
        Err(AuthError::InvalidCredentials(message))
    } else {
        Err(AuthError::ProviderError(format!("{status}: {message}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn error_message_prefers_descriptions() {
        assert_eq!(
            error_message(&json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
            Some("Invalid login credentials".into())
        );
        assert_eq!(
            error_message(&json!({"error": "Email already registered"})),
            Some("Email already registered".into())
        );
        assert_eq!(error_message(&json!({"error": {"code": 1}})), None);
    }
}
