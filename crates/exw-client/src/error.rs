//! API client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the session token. The session has been cleared.
    #[error("session rejected by the server (run `exw auth login`)")]
    Unauthorized,

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// No usable token, or the provider failed.
    #[error(transparent)]
    Auth(#[from] exw_auth::AuthError),
}

impl ApiError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
