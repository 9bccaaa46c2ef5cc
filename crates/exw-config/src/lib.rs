//! # exw-config
//!
//! Layered configuration loading for Exitwise using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EXITWISE_*` prefix, `__` as separator)
//! 2. Project-level `.exitwise/config.toml`
//! 3. User-level `~/.config/exitwise/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EXITWISE_API__BASE_URL` -> `api.base_url`,
//! `EXITWISE_SUPABASE__ANON_KEY` -> `supabase.anon_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use exw_config::ExwConfig;
//!
//! let config = ExwConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.base());
//! ```

mod api;
mod auth;
mod error;
mod storage;
mod supabase;
mod timing;

pub use api::ApiConfig;
pub use auth::{AuthConfig, AuthProviderKind};
pub use error::ConfigError;
pub use storage::StorageConfig;
pub use supabase::SupabaseConfig;
pub use timing::TimingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every config key.
pub const ENV_PREFIX: &str = "EXITWISE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExwConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl ExwConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".exitwise/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check the values the client depends on.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for a bad API section, and
    /// [`ConfigError::NotConfigured`] when Supabase is selected but missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.auth.provider == AuthProviderKind::Supabase {
            self.require_supabase()?;
        }
        Ok(())
    }

    /// The Supabase section, if complete.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotConfigured`] when the URL or anon key is missing.
    pub fn require_supabase(&self) -> Result<&SupabaseConfig, ConfigError> {
        if self.supabase.is_configured() {
            Ok(&self.supabase)
        } else {
            Err(ConfigError::NotConfigured {
                section: "supabase".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("exitwise").join("config.toml"))
    }

    /// Load `.env` from the workspace root, then the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
