use exw_config::ExwConfig;

/// Load `.env`, then the layered config, and check it.
pub fn load_config() -> anyhow::Result<ExwConfig> {
    let config = ExwConfig::load_with_dotenv()?;
    config.validate()?;
    tracing::debug!(
        api = %config.api.base(),
        provider = %config.auth.provider,
        "configuration loaded"
    );
    Ok(config)
}
