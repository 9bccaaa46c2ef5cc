//! Cross-cutting error types for Exitwise.
//!
//! Transport, storage and auth errors live in their own crates. `exw-cli`
//! converges all of them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by domain operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} {id} cannot move from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Input failed validation (unknown field, out-of-range value).
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
