//! Configuration file parsing for the transform server.
//!
//! Loads the bind address, log level, the project metadata used when
//! exporting TDS configuration, and the global transform settings.

use crate::registry::TransformSetting;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A field is present but unusable
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Transform server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (default: 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Log filter used when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Project metadata for TDS export
    #[serde(default)]
    pub project: ProjectConfig,

    /// Settings attached to every transform, exported as `global#name`
    #[serde(default)]
    pub global_settings: Vec<TransformSetting>,
}

/// Project metadata written into the transforms CSV
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Transform owner
    #[serde(default)]
    pub owner: String,

    /// Transform author
    #[serde(default)]
    pub author: String,

    /// Public base URL of this server, e.g. `https://transforms.example.com`
    #[serde(default)]
    pub host_url: Option<String>,

    /// TDS seed ids the transforms are published to
    #[serde(default)]
    pub seed_ids: Vec<String>,

    /// Transform version (default: "0.1")
    #[serde(default = "default_version")]
    pub version: String,

    /// Appended to every transform's display name
    #[serde(default)]
    pub display_name_suffix: String,

    /// OAuth setting ids for the transforms
    #[serde(default)]
    pub oauth_settings_ids: Vec<String>,

    /// Maximum rows per exported CSV file (default: 100)
    #[serde(default = "default_csv_line_limit")]
    pub csv_line_limit: usize,

    /// Write the `outputEntities` column to the transforms CSV (default: true)
    #[serde(default = "default_include_output_entities")]
    pub include_output_entities: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            author: String::new(),
            host_url: None,
            seed_ids: Vec::new(),
            version: default_version(),
            display_name_suffix: String::new(),
            oauth_settings_ids: Vec::new(),
            csv_line_limit: default_csv_line_limit(),
            include_output_entities: default_include_output_entities(),
        }
    }
}

impl ProjectConfig {
    /// The host URL, required for export
    pub fn host_url(&self) -> Result<&str, ConfigError> {
        self.host_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::MissingField("project.host_url".to_string()))
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_version() -> String {
    "0.1".to_string()
}

fn default_csv_line_limit() -> usize {
    100
}

fn default_include_output_entities() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            log_level: default_log_level(),
            project: ProjectConfig::default(),
            global_settings: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: ServerConfig = toml::from_str(contents)?;

        if config.project.csv_line_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "project.csv_line_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        for setting in &mut config.global_settings {
            setting.global = true;
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            project: ProjectConfig {
                owner: "Test Owner".to_string(),
                author: "Test Author".to_string(),
                host_url: Some("http://localhost:8080".to_string()),
                seed_ids: vec!["demo".to_string()],
                ..ProjectConfig::default()
            },
            ..ServerConfig::default()
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.project.version, "0.1");
        assert_eq!(config.project.csv_line_limit, 100);
        assert!(config.project.include_output_entities);
    }

    #[test]
    fn test_output_entities_toggle() {
        let config = ServerConfig::from_toml("[project]\ninclude_output_entities = false").unwrap();
        assert!(!config.project.include_output_entities);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.bind_port, 8080);
        assert!(config.project.host_url.is_none());
        assert!(config.global_settings.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            log_level = "debug"

            [project]
            owner = "ACME"
            author = "Jane"
            host_url = "https://tx.acme.test"
            seed_ids = ["acme-seed"]
            display_name_suffix = " [ACME]"
            csv_line_limit = 25

            [[global_settings]]
            name = "api_key"
            display_name = "API Key"
            setting_type = "string"
            popup = true
        "#;

        let config = ServerConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.project.owner, "ACME");
        assert_eq!(config.project.host_url().unwrap(), "https://tx.acme.test");
        assert_eq!(config.project.seed_ids, vec!["acme-seed"]);
        assert_eq!(config.project.csv_line_limit, 25);
        assert_eq!(config.global_settings.len(), 1);
        assert!(config.global_settings[0].global);
        assert_eq!(config.global_settings[0].id(), "global#api_key");
    }

    #[test]
    fn test_missing_host_url() {
        let config = ServerConfig::from_toml("[project]\nhost_url = \"\"").unwrap();
        assert!(matches!(
            config.project.host_url(),
            Err(ConfigError::MissingField(field)) if field == "project.host_url"
        ));
    }

    #[test]
    fn test_zero_line_limit_rejected() {
        let result = ServerConfig::from_toml("[project]\ncsv_line_limit = 0");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ServerConfig::from_toml("bind_port = \"eighty\""),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
