//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.banter/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::state::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BanterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_model: Option<String>,
    pub theme: Option<Theme>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub theme: Theme,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.banter/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".banter").join("config.toml"))
}

/// Load config from `~/.banter/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BanterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<BanterConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(BanterConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(BanterConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: BanterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Banter Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_model = "gemini-1.5-flash"
# theme = "dark"                     # "dark" or "light"

# [gemini]
# api_key = "AIza..."                # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_model` and `cli_base_url` are from CLI flags (None = not specified).
pub fn resolve(
    config: &BanterConfig,
    cli_model: Option<&str>,
    cli_base_url: Option<&str>,
) -> ResolvedConfig {
    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| std::env::var("BANTER_MODEL").ok())
        .or_else(|| config.general.default_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: env → config
    let gemini_api_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .or_else(|| config.gemini.api_key.clone());

    // Base URL: CLI → env → config → default
    let gemini_base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("GEMINI_BASE_URL").ok())
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    ResolvedConfig {
        model_name,
        theme: config.general.theme.unwrap_or_default(),
        gemini_api_key,
        gemini_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = BanterConfig::default();
        assert!(config.general.default_model.is_none());
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = BanterConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.model_name, DEFAULT_MODEL);
        assert_eq!(resolved.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(resolved.theme, Theme::default());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = BanterConfig {
            general: GeneralConfig {
                default_model: Some("gemini-1.5-pro".to_string()),
                theme: Some(Theme::Light),
            },
            gemini: GeminiConfig {
                api_key: Some("AIza-test".to_string()),
                base_url: Some("http://localhost:9999/v1beta".to_string()),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.model_name, "gemini-1.5-pro");
        assert_eq!(resolved.theme, Theme::Light);
        assert_eq!(resolved.gemini_api_key.as_deref(), Some("AIza-test"));
        assert_eq!(resolved.gemini_base_url, "http://localhost:9999/v1beta");
    }

    #[test]
    fn test_resolve_cli_model_wins() {
        let config = BanterConfig {
            general: GeneralConfig {
                default_model: Some("from-config".to_string()),
                theme: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("from-cli"), None);
        assert_eq!(resolved.model_name, "from-cli");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_model = "gemini-1.5-flash"
theme = "light"

[gemini]
api_key = "AIza-123"
base_url = "http://192.168.1.100:8000/v1beta"
"#;
        let config: BanterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.default_model.as_deref(),
            Some("gemini-1.5-flash")
        );
        assert_eq!(config.general.theme, Some(Theme::Light));
        assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-123"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[gemini]
api_key = "AIza-xyz"
"#;
        let config: BanterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-xyz"));
        assert!(config.general.default_model.is_none());
        assert!(config.general.theme.is_none());
    }
}
