use std::{fs, path::Path};

use tracing::{debug, info};

use super::{Config, ConfigPaths};
use crate::core::{Result, SessionError};

impl Config {
    /// Load the main configuration file, or defaults if there is none.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        Self::from_file(&path)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `SessionError::Io` if the file cannot be read, or
    /// `SessionError::TomlParseError` if it is not valid configuration.
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config =
            toml::from_str(&content).map_err(|e| SessionError::toml_parse(e, Some(path)))?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `SessionError::TomlParseError` if the string is not valid configuration.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| SessionError::toml_parse(e, None))
    }

    /// JSON schema of the configuration, pretty printed.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be serialized.
    pub fn json_schema() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&schemars::schema_for!(Config))
    }
}
