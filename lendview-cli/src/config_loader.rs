//! Persistent CLI Configuration Loader
//!
//! Configuration is loaded from `~/.config/lendview/config.toml` on Linux,
//! `~/Library/Application Support/lendview/config.toml` on macOS, or
//! `%APPDATA%\lendview\config.toml` on Windows.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Settings JSON to open when `--settings` is not given.
    pub settings_path: Option<PathBuf>,
    /// Market tab to start on ("supply" or "borrow").
    pub market: Option<String>,
    /// Start with "Lending APY" instead of "Net APY".
    pub lending_apy: Option<bool>,
    /// Network id reported by the wallet. Leave unset when no wallet is installed.
    pub wallet_network: Option<String>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
}

impl CliConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lendview"))
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Attempts to load configuration from the default config file location.
    /// Returns `CliConfig::default()` if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            debug!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Saves the current configuration to the default config file location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(&path, content)?;
        debug!("Saved configuration to {:?}", path);
        Ok(path)
    }

    /// Writes the sample configuration to the default location.
    pub fn create_sample() -> Result<PathBuf, std::io::Error> {
        Self::sample().save()
    }

    pub fn sample() -> Self {
        CliConfig {
            settings_path: Some(PathBuf::from("demos/settings.json")),
            market: Some("supply".to_string()),
            lending_apy: Some(false),
            wallet_network: None,
            enable_logging: Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CliConfig::default();
        assert!(config.settings_path.is_none());
        assert!(config.wallet_network.is_none());
    }

    #[test]
    fn test_config_kebab_case_keys() {
        let toml_str = toml::to_string(&CliConfig::sample()).unwrap();
        assert!(toml_str.contains("settings-path"));
        assert!(toml_str.contains("lending-apy"));
    }

    #[test]
    fn test_config_parse() {
        let config = CliConfig::parse(
            r#"
            market = "borrow"
            wallet-network = "56"
            "#,
        )
        .unwrap();
        assert_eq!(config.market.as_deref(), Some("borrow"));
        assert_eq!(config.wallet_network.as_deref(), Some("56"));
        assert!(config.enable_logging.is_none());
    }
}
