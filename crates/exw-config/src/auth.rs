//! Authentication backend selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which authentication backend issues bearer tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProviderKind {
    /// The backend's own `/auth/login` and `/auth/register` endpoints.
    #[default]
    Legacy,
    /// Supabase password grant.
    Supabase,
}

impl AuthProviderKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Supabase => "supabase",
        }
    }
}

impl fmt::Display for AuthProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub provider: AuthProviderKind,
}
