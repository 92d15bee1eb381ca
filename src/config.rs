use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Deployed address the landing-style `search` command talks to
pub const DEFAULT_SEARCH_BACKEND: &str = "https://tubecue-back.onrender.com";

/// Development address the `find` command talks to
pub const DEFAULT_FIND_BACKEND: &str = "http://localhost:4000";

/// The two backend base URLs are configuration, not code. Both commands hit
/// `{base}/search`; they differ only in which base they default to.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub search_backend: Option<String>,
    pub find_backend: Option<String>,
}

impl Config {
    /// Load config from ~/.config/tubecue/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("tubecue")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
search_backend = "https://tubecue.example.com"
find_backend = "http://127.0.0.1:5000"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search_backend.as_deref(), Some("https://tubecue.example.com"));
        assert_eq!(config.find_backend.as_deref(), Some("http://127.0.0.1:5000"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.search_backend.is_none());
        assert!(config.find_backend.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"find_backend = "http://localhost:4000""#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.find_backend.as_deref(), Some("http://localhost:4000"));
        assert!(config.search_backend.is_none());
    }
}
