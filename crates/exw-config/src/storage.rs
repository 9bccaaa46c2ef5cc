//! Local persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for persisted client state. Empty means the platform data
    /// directory (`~/.local/share/exitwise` on Linux).
    #[serde(default)]
    pub dir: String,
}

impl StorageConfig {
    /// The directory to use.
    ///
    /// Falls back to `.exitwise/data` in the working directory when the
    /// platform has no data directory.
    #[must_use]
    pub fn resolved_dir(&self) -> PathBuf {
        if !self.dir.is_empty() {
            return PathBuf::from(&self.dir);
        }
        dirs::data_dir().map_or_else(
            || PathBuf::from(".exitwise").join("data"),
            |p| p.join("exitwise"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            dir: "/tmp/exw-state".into(),
        };
        assert_eq!(config.resolved_dir(), PathBuf::from("/tmp/exw-state"));
    }

    #[test]
    fn default_dir_ends_in_app_name() {
        let dir = StorageConfig::default().resolved_dir();
        assert!(dir.ends_with("exitwise") || dir.ends_with(".exitwise/data"));
    }
}
