//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tiny_navigation::{InterpretMode, DEFAULT_SEARCH_TEMPLATE};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search engine URL template
    pub search_engine: String,
    /// Address bar text loaded when the window appears
    pub homepage: String,
    /// How address bar text is turned into a URL
    pub interpretation: InterpretMode,
    /// Let the headless engine probe targets over the network
    pub probe_network: bool,
    pub probe_timeout_secs: u64,
}

impl Config {
    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn load_default() -> Result<Self> {
        Self::load(&Self::data_dir().join("config.json"))
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Tiny"))
            .unwrap_or_else(|| PathBuf::from(".tiny"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_engine: DEFAULT_SEARCH_TEMPLATE.to_string(),
            homepage: "hrln-interactive.com".to_string(),
            interpretation: InterpretMode::Classified,
            probe_network: false,
            probe_timeout_secs: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "homepage": "apple.com", "interpretation": "legacy" }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.homepage, "apple.com");
        assert_eq!(config.interpretation, InterpretMode::Legacy);
        assert_eq!(config.search_engine, DEFAULT_SEARCH_TEMPLATE);
        assert!(!config.probe_network);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(crate::CoreError::Serialization(_))
        ));
    }
}
