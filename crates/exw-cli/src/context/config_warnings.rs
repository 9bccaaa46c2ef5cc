use exw_config::{AuthProviderKind, ExwConfig};

/// Warn about env vars that look like config keys but were not picked up.
pub fn warn_unconfigured(config: &ExwConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ExwConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let keys: Vec<String> = env.into_iter().map(|(key, _)| key).collect();
    let mut warnings = Vec::new();

    if !config.supabase.is_configured() && has_prefix(&keys, "EXITWISE_SUPABASE") {
        warnings.push(
            "Supabase config is incomplete while EXITWISE_SUPABASE* env vars exist. Use double underscores (example: EXITWISE_SUPABASE__ANON_KEY)."
                .to_string(),
        );
    }

    if config.api.base_url == exw_config::ApiConfig::default().base_url
        && keys.iter().any(|key| key == "EXITWISE_API_BASE_URL" || key == "EXITWISE_API_URL")
    {
        warnings.push(
            "API base URL is the default while EXITWISE_API_* env vars exist. Use double underscores (example: EXITWISE_API__BASE_URL)."
                .to_string(),
        );
    }

    if config.auth.provider == AuthProviderKind::Legacy && config.supabase.is_configured() {
        warnings.push(
            "Supabase is configured but auth.provider is 'legacy'. Set EXITWISE_AUTH__PROVIDER=supabase to use it."
                .to_string(),
        );
    }

    warnings
}

fn has_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use exw_config::ExwConfig;
    use pretty_assertions::assert_eq;

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_supabase_vars() {
        let warnings = collect_unconfigured_warnings(
            &ExwConfig::default(),
            env(&[("EXITWISE_SUPABASE_URL", "https://x.supabase.co")]),
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("EXITWISE_SUPABASE__ANON_KEY"));
    }

    #[test]
    fn warns_for_single_underscore_api_url() {
        let warnings = collect_unconfigured_warnings(
            &ExwConfig::default(),
            env(&[("EXITWISE_API_BASE_URL", "http://10.0.0.2:5000/api")]),
        );
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn warns_when_supabase_is_configured_but_unused() {
        let mut config = ExwConfig::default();
        config.supabase.url = "https://x.supabase.co".into();
        config.supabase.anon_key = "anon".into();
        let warnings = collect_unconfigured_warnings(&config, Vec::new());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("EXITWISE_AUTH__PROVIDER"));
    }

    #[test]
    fn no_warnings_for_default_config() {
        let warnings = collect_unconfigured_warnings(&ExwConfig::default(), env(&[("HOME", "/root")]));
        assert!(warnings.is_empty());
    }
}
