//! Configuration loading for the folio client.
//!
//! A TOML file given by `--config` or `FOLIO_CLIENT_CONFIG`:
//!
//! ```toml
//! api_base_url = "http://localhost:3000"
//! request_timeout_ms = 5000
//! state_path = "~/.local/state/folio/selection.json"
//!
//! [theme]
//! table_path = "themes.toml"   # optional, builtin table otherwise
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use folio_core::ThemeTable;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "FOLIO_CLIENT_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    /// File backing the durable tier of the theme selection.
    pub state_path: PathBuf,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// TOML theme table (`[[themes]]` entries). Builtin table when absent.
    #[serde(default)]
    pub table_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or FOLIO_CLIENT_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ClientConfig {
    /// Load from `explicit`, falling back to `FOLIO_CLIENT_CONFIG`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(config_path_from_env)
            .ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.state_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "state_path",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(path) = &self.theme.table_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "theme.table_path",
                    reason: "must not be empty when set".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The configured theme table, or the builtin one.
    pub fn theme_table(&self) -> Result<ThemeTable, ConfigError> {
        let Some(path) = &self.theme.table_path else {
            return Ok(ThemeTable::builtin());
        };
        let contents = std::fs::read_to_string(path)?;
        let table: ThemeTable = toml::from_str(&contents)?;
        if table.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "theme.table_path",
                reason: "theme table has no entries".to_string(),
            });
        }
        Ok(table)
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
api_base_url = "http://localhost:3000"
request_timeout_ms = 2500
state_path = "/tmp/folio/selection.json"
"#;

    #[test]
    fn test_parse_minimal_config() {
        let config = ClientConfig::from_toml(VALID).unwrap();
        assert_eq!(config.request_timeout_ms, 2500);
        assert!(config.theme.table_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let raw = format!("{}\nretries = 3\n", VALID);
        assert!(matches!(
            ClientConfig::from_toml(&raw),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = ClientConfig::from_toml(VALID).unwrap();
        config.request_timeout_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_base() {
        let mut config = ClientConfig::from_toml(VALID).unwrap();
        config.api_base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builtin_table_without_path() {
        let config = ClientConfig::from_toml(VALID).unwrap();
        let table = config.theme_table().unwrap();
        assert!(table.contains("cloud"));
    }

    #[test]
    fn test_table_loaded_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let table_path = dir.path().join("themes.toml");
        std::fs::write(
            &table_path,
            r##"
[[themes]]
name = "paper"
icon = "mdi-file"

[themes.light]
background = "#ffffff"
"##,
        )
        .unwrap();

        let mut config = ClientConfig::from_toml(VALID).unwrap();
        config.theme.table_path = Some(table_path);
        let table = config.theme_table().unwrap();
        assert_eq!(table.names(), vec!["paper".to_string()]);
    }
}
