use exw_config::{AuthProviderKind, ExwConfig};
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("EXITWISE_API__BASE_URL", "http://127.0.0.1:9000/api");
        jail.set_env("EXITWISE_AUTH__PROVIDER", "supabase");
        jail.set_env("EXITWISE_SUPABASE__URL", "https://abcd.supabase.co");
        jail.set_env("EXITWISE_SUPABASE__ANON_KEY", "anon");

        let config: ExwConfig = ExwConfig::figment().extract()?;
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.auth.provider, AuthProviderKind::Supabase);
        assert!(config.supabase.is_configured());
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".exitwise")?;
        jail.create_file(
            ".exitwise/config.toml",
            r#"
[timing]
debounce_ms = 100
"#,
        )?;
        jail.set_env("EXITWISE_TIMING__DEBOUNCE_MS", "1500");

        let config: ExwConfig = ExwConfig::figment().extract()?;
        assert_eq!(config.timing.debounce_ms, 1500);
        Ok(())
    });
}

#[test]
fn single_underscore_vars_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("EXITWISE_SUPABASE_URL", "https://abcd.supabase.co");

        let config: ExwConfig = ExwConfig::figment().extract()?;
        assert!(!config.supabase.is_configured());
        Ok(())
    });
}
