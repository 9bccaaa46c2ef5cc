//! Supabase authentication configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g., `https://abcd.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public anon key, sent as the `apikey` header.
    #[serde(default)]
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Check if the Supabase config has the minimum required fields.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!SupabaseConfig::default().is_configured());
    }

    #[test]
    fn not_configured_without_anon_key() {
        let config = SupabaseConfig {
            url: "https://abcd.supabase.co".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn configured_when_both_set() {
        let config = SupabaseConfig {
            url: "https://abcd.supabase.co".into(),
            anon_key: "anon".into(),
        };
        assert!(config.is_configured());
    }
}
