use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use tracing::debug;

use crate::types::{Asset, LendError, RawAsset, TokenDecimals};

/// Environment variable naming a settings JSON file.
pub const SETTINGS_ENV: &str = "LENDVIEW_SETTINGS";

/// Shared user settings read by every dashboard component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Ordered asset list as delivered by the account feed.
    pub asset_list: Vec<RawAsset>,
    /// The asset currently shown in the action card, if any.
    pub selected_asset: Option<Asset>,
    /// Token precisions keyed by asset id.
    pub decimals: HashMap<String, TokenDecimals>,
    /// Show yields including reward emissions ("Net APY").
    #[serde(rename = "withSTRK")]
    pub with_strk: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            asset_list: Vec::new(),
            selected_asset: None,
            decimals: HashMap::new(),
            with_strk: true,
        }
    }
}

impl std::str::FromStr for Settings {
    type Err = LendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
            .map_err(|e| LendError::Configuration(format!("Failed to parse settings JSON: {}", e)))
    }
}

impl Settings {
    pub fn new(asset_list: Vec<RawAsset>) -> Self {
        Self {
            asset_list,
            ..Default::default()
        }
    }

    pub fn with_decimals(mut self, id: impl Into<String>, token: u32, stoken: u32) -> Self {
        self.decimals.insert(id.into(), TokenDecimals { token, stoken });
        self
    }

    pub fn with_selected_asset(mut self, asset: Asset) -> Self {
        self.selected_asset = Some(asset);
        self
    }

    /// True when a selection with a non-empty id is stored.
    pub fn has_selection(&self) -> bool {
        self.selected_asset
            .as_ref()
            .is_some_and(|asset| !asset.id.is_empty())
    }

    /// Precision entry for an asset id.
    pub fn token_decimals(&self, id: &str) -> Result<TokenDecimals, LendError> {
        self.decimals
            .get(id)
            .copied()
            .ok_or_else(|| LendError::MissingDecimals(id.to_string()))
    }

    /// Loads settings from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, LendError> {
        let content = fs::read_to_string(path)
            .map_err(|e| LendError::Io(format!("Failed to read settings file {}: {}", path, e)))?;
        content.parse()
    }

    /// Loads settings from the file named by `LENDVIEW_SETTINGS`.
    pub fn from_env() -> Result<Self, LendError> {
        let path = env::var(SETTINGS_ENV)
            .map_err(|_| LendError::Configuration(format!("{} env var not set", SETTINGS_ENV)))?;
        Self::try_from_json(&path)
    }
}

/// A single fire-and-forget write to the settings.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsUpdate {
    SelectedAsset(Asset),
    WithStrk(bool),
    AssetList(Vec<RawAsset>),
}

/// Read/write access to the shared settings.
///
/// Components never hold the settings themselves; they read through this
/// trait and dispatch writes back into it.
pub trait SettingsStore {
    fn settings(&self) -> &Settings;

    fn dispatch(&mut self, update: SettingsUpdate);

    /// Bumped whenever `asset_list` is replaced.
    fn asset_list_revision(&self) -> u64;
}

/// Settings held in memory, owned by whoever drives the update loop.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    settings: Settings,
    asset_list_revision: u64,
}

impl InMemorySettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            asset_list_revision: 1,
        }
    }

    pub fn into_inner(self) -> Settings {
        self.settings
    }
}

impl SettingsStore for InMemorySettings {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn dispatch(&mut self, update: SettingsUpdate) {
        match update {
            SettingsUpdate::SelectedAsset(asset) => {
                debug!(asset = %asset.id, "settings: selected asset");
                self.settings.selected_asset = Some(asset);
            }
            SettingsUpdate::WithStrk(value) => {
                debug!(with_strk = value, "settings: yield display");
                self.settings.with_strk = value;
            }
            SettingsUpdate::AssetList(list) => {
                debug!(count = list.len(), "settings: asset list replaced");
                self.settings.asset_list = list;
                self.asset_list_revision += 1;
            }
        }
    }

    fn asset_list_revision(&self) -> u64 {
        self.asset_list_revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.with_strk);
        assert!(settings.asset_list.is_empty());
        assert!(!settings.has_selection());
    }

    #[test]
    fn test_settings_from_json() {
        let json = r#"{
            "assetList": [{"id": "dai", "supplyBalance": "10"}],
            "decimals": {"dai": {"token": 18, "stoken": 8}}
        }"#;
        let settings: Settings = json.parse().unwrap();
        assert_eq!(settings.asset_list.len(), 1);
        assert!(settings.with_strk);
        assert_eq!(settings.token_decimals("dai").unwrap().stoken, 8);
        assert_eq!(
            settings.token_decimals("eth"),
            Err(LendError::MissingDecimals("eth".to_string()))
        );
    }

    #[test]
    fn test_empty_id_is_not_a_selection() {
        let settings = Settings::default().with_selected_asset(Asset::default());
        assert!(!settings.has_selection());
    }

    #[test]
    fn test_asset_list_revision_bumps() {
        let mut store = InMemorySettings::new(Settings::default());
        let before = store.asset_list_revision();
        store.dispatch(SettingsUpdate::WithStrk(false));
        assert_eq!(store.asset_list_revision(), before);
        store.dispatch(SettingsUpdate::AssetList(vec![RawAsset::new("eth")]));
        assert_eq!(store.asset_list_revision(), before + 1);
        assert!(!store.settings().with_strk);
    }

    #[test]
    fn test_bad_json_is_configuration_error() {
        let result: Result<Settings, _> = "{not json".parse();
        assert!(matches!(result, Err(LendError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Settings::try_from_json("does/not/exist/settings.json");
        match result {
            Err(LendError::Io(msg)) => assert!(msg.contains("does/not/exist/settings.json")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
