use std::fmt;
use std::sync::Arc;

use exw_store::{Repository, RepositoryExt, keys};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "exitwise-cli";
const KEYRING_USER: &str = "access-token";

/// Environment variable holding a token for headless use.
pub const TOKEN_ENV: &str = "EXITWISE_AUTH__TOKEN";

/// Keyring service name. `EXITWISE_KEYRING_SERVICE` overrides it so test
/// runs never touch real credentials.
fn keyring_service() -> String {
    std::env::var("EXITWISE_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Where a token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    Store,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token persistence: OS keyring first, the repository `token` key as
/// fallback. [`TOKEN_ENV`] is consulted on load but never written.
#[derive(Clone)]
pub struct TokenStore {
    repo: Arc<dyn Repository>,
    use_keyring: bool,
    use_env: bool,
}

impl TokenStore {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self {
            repo,
            use_keyring: true,
            use_env: true,
        }
    }

    /// A store that never touches the OS keyring.
    pub fn without_keyring(repo: Arc<dyn Repository>) -> Self {
        Self {
            repo,
            use_keyring: false,
            use_env: true,
        }
    }

    /// A store backed by the repository alone: no keyring, no [`TOKEN_ENV`].
    pub fn repository_only(repo: Arc<dyn Repository>) -> Self {
        Self {
            repo,
            use_keyring: false,
            use_env: false,
        }
    }

    fn entry(&self) -> Option<keyring::Entry> {
        if !self.use_keyring {
            return None;
        }
        match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    /// Store `token`, returning where it went.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if both keyring and repository fail.
    pub fn store(&self, token: &str) -> Result<TokenSource, AuthError> {
        if let Some(entry) = self.entry() {
            match entry.set_password(token) {
                Ok(()) => {
                    // Only one copy of the token is kept.
                    self.repo.remove(keys::TOKEN)?;
                    return Ok(TokenSource::Keyring);
                }
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to local store");
                }
            }
        }
        self.repo.save(keys::TOKEN, token)?;
        Ok(TokenSource::Store)
    }

    /// Load a token. Priority: keyring → [`TOKEN_ENV`] → repository.
    #[must_use]
    pub fn load(&self) -> Option<(String, TokenSource)> {
        if let Some(entry) = self.entry()
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some((token, TokenSource::Keyring));
        }

        if self.use_env
            && let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            return Some((token, TokenSource::Env));
        }

        match self.repo.load::<String>(keys::TOKEN) {
            Ok(Some(token)) if !token.trim().is_empty() => Some((token, TokenSource::Store)),
            Ok(_) => None,
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable stored token");
                None
            }
        }
    }

    /// Delete the token from keyring and repository.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the repository entry cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.entry() {
            let _ = entry.delete_credential();
        }
        self.repo.remove(keys::TOKEN)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exw_store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn store_load_delete_without_keyring() {
        let repo = Arc::new(MemoryStore::new());
        let tokens = TokenStore::repository_only(repo.clone());

        assert_eq!(tokens.store("abc").unwrap(), TokenSource::Store);
        assert_eq!(tokens.load(), Some(("abc".to_string(), TokenSource::Store)));

        tokens.delete().unwrap();
        assert!(repo.load_value(keys::TOKEN).unwrap().is_none());
    }

    #[test]
    fn blank_stored_token_is_ignored() {
        let repo = Arc::new(MemoryStore::new());
        repo.save(keys::TOKEN, "  ").unwrap();
        let tokens = TokenStore::repository_only(repo);
        assert!(tokens.load().is_none());
    }

    #[test]
    fn repository_only_store_ignores_env_token() {
        let repo = Arc::new(MemoryStore::new());
        let tokens = TokenStore::repository_only(repo.clone());
        assert!(tokens.load().is_none());

        repo.save(keys::TOKEN, "from-repo").unwrap();
        assert_eq!(tokens.load(), Some(("from-repo".to_string(), TokenSource::Store)));
    }

    #[test]
    fn source_names() {
        assert_eq!(TokenSource::Keyring.to_string(), "keyring");
        assert_eq!(TokenSource::Store.as_str(), "store");
    }
}
