use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or environment variable could not be read into [`crate::ExwConfig`].
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// The selected feature needs a section that is missing or incomplete.
    #[error("[{section}] is required but incomplete; set it in config.toml or EXITWISE_* variables")]
    NotConfigured { section: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
