use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated (run `exw auth login`)")]
    NotAuthenticated,

    #[error("token expired (run `exw auth login` to sign in again)")]
    TokenExpired,

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("auth provider error: {0}")]
    ProviderError(String),

    #[error("{0}")]
    Other(String),
}

impl From<exw_store::StoreError> for AuthError {
    fn from(error: exw_store::StoreError) -> Self {
        Self::TokenStoreError(error.to_string())
    }
}
