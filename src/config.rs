use serde::Deserialize;
use std::path::PathBuf;

use crate::parser::types::RegistryType;

// =============================================================================
// Time-related constants
// =============================================================================

/// Quiet period before a manifest pass starts after the last trigger (300ms)
pub const DEBOUNCE_INTERVAL_MS: u64 = 300;

/// Lifetime of a cached changelog in seconds (1 hour)
pub const CHANGELOG_CACHE_TTL_SECS: i64 = 60 * 60;

/// Key under which editors may nest the settings object
pub const SETTINGS_SECTION: &str = "versionLens";

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "VERSION_LENS_LOG";

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "version-lens.log";

/// LSP configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LspConfig {
    pub enable_changelog_cache: bool,
    pub registries: RegistriesConfig,
}

impl Default for LspConfig {
    fn default() -> Self {
        Self {
            enable_changelog_cache: true,
            registries: RegistriesConfig::default(),
        }
    }
}

impl LspConfig {
    /// Read settings from `initializationOptions` or a `didChangeConfiguration`
    /// payload. Accepts both the bare object and one nested under `versionLens`.
    /// Anything unreadable falls back to defaults.
    pub fn from_settings(value: Option<serde_json::Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        let value = match value.get(SETTINGS_SECTION) {
            Some(nested) => nested.clone(),
            None => value,
        };

        serde_json::from_value(value)
            .inspect_err(|e| tracing::warn!("Invalid settings, using defaults: {}", e))
            .unwrap_or_default()
    }
}

/// Registry-specific configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistriesConfig {
    pub npm: RegistryConfig,
    pub pypi: RegistryConfig,
    pub rubygems: RegistryConfig,
}

impl RegistriesConfig {
    pub fn is_enabled(&self, registry_type: RegistryType) -> bool {
        match registry_type {
            RegistryType::Npm => self.npm.enabled,
            RegistryType::PyPI => self.pypi.enabled,
            RegistryType::RubyGems => self.rubygems.enabled,
        }
    }
}

/// Individual registry configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    pub enabled: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Returns the path to the data directory for version-lens.
/// Uses $XDG_DATA_HOME/version-lens if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-lens,
/// or ./version-lens if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("version-lens")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lsp_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<LspConfig>(json!({
            "enableChangelogCache": false
        }))
        .unwrap();

        assert!(!result.enable_changelog_cache);
        assert_eq!(result.registries, RegistriesConfig::default());
    }

    #[test]
    fn lsp_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<LspConfig>(json!({
            "enableChangelogCache": true,
            "registries": {
                "npm": { "enabled": false },
                "pypi": { "enabled": true },
                "rubygems": { "enabled": false }
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            LspConfig {
                enable_changelog_cache: true,
                registries: RegistriesConfig {
                    npm: RegistryConfig { enabled: false },
                    pypi: RegistryConfig { enabled: true },
                    rubygems: RegistryConfig { enabled: false },
                }
            }
        );
    }

    #[test]
    fn registries_is_enabled_reads_matching_flag() {
        let config = RegistriesConfig {
            npm: RegistryConfig { enabled: false },
            ..Default::default()
        };

        assert!(!config.is_enabled(RegistryType::Npm));
        assert!(config.is_enabled(RegistryType::PyPI));
        assert!(config.is_enabled(RegistryType::RubyGems));
    }

    #[test]
    fn from_settings_reads_nested_section() {
        let result = LspConfig::from_settings(Some(json!({
            "versionLens": { "enableChangelogCache": false }
        })));

        assert!(!result.enable_changelog_cache);
    }

    #[test]
    fn from_settings_falls_back_to_defaults() {
        assert_eq!(LspConfig::from_settings(None), LspConfig::default());
        assert_eq!(
            LspConfig::from_settings(Some(json!({ "enableChangelogCache": "yes" }))),
            LspConfig::default()
        );
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/version-lens"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/version-lens"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./version-lens"));
    }
}
