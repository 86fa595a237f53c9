//! Configuration management and validation.
//!
//! Provides the resolved settings for a pokedex invocation: where the source
//! CSV and the SQLite store live, how the source is parsed, and when the
//! store is rebuilt. Settings are layered as defaults, then environment
//! variables, then command-line overrides.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_DELIMITER, DEFAULT_SOURCE_FILENAME, DEFAULT_STORE_FILENAME,
    SOURCE_ENV_VAR, STORE_ENV_VAR,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// How the loader treats a row that fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadMode {
    /// Abort the whole load on the first malformed row; nothing is written
    #[default]
    Strict,
    /// Skip malformed rows with a warning and load the rest
    Lenient,
}

/// When the store is rebuilt from the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReloadPolicy {
    /// Load only when the species table is missing or empty
    #[default]
    IfEmpty,
    /// Drop and rebuild the table on every run
    Always,
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Species CSV file
    pub source_path: PathBuf,

    /// SQLite store file
    pub store_path: PathBuf,

    /// Field delimiter in the source file
    pub delimiter: char,

    pub load_mode: LoadMode,

    pub reload_policy: ReloadPolicy,

    /// Show a progress bar while loading
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_FILENAME),
            store_path: Self::default_store_path(),
            delimiter: DEFAULT_DELIMITER,
            load_mode: LoadMode::default(),
            reload_policy: ReloadPolicy::default(),
            show_progress: false,
        }
    }
}

impl Config {
    /// Default store location under the user data directory
    ///
    /// Falls back to the working directory when no data directory is known.
    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_STORE_FILENAME)
    }

    /// Defaults with environment variable overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_values(
            std::env::var(SOURCE_ENV_VAR).ok(),
            std::env::var(STORE_ENV_VAR).ok(),
        );
        config
    }

    /// Apply source and store overrides taken from the environment
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// clobber the default.
    pub fn apply_env_values(&mut self, source: Option<String>, store: Option<String>) {
        if let Some(source) = source.filter(|s| !s.trim().is_empty()) {
            debug!("Source path from {}: {}", SOURCE_ENV_VAR, source);
            self.source_path = PathBuf::from(source);
        }
        if let Some(store) = store.filter(|s| !s.trim().is_empty()) {
            debug!("Store path from {}: {}", STORE_ENV_VAR, store);
            self.store_path = PathBuf::from(store);
        }
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(Error::configuration("Source path cannot be empty"));
        }

        if self.store_path.as_os_str().is_empty() {
            return Err(Error::configuration("Store path cannot be empty"));
        }

        if !self.delimiter.is_ascii() || self.delimiter == '"' || self.delimiter == '\n' {
            return Err(Error::configuration(format!(
                "Delimiter {:?} must be a single ASCII character other than quote or newline",
                self.delimiter
            )));
        }

        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }

    /// Create the directory holding the store file if it does not exist
    pub fn ensure_store_directory(&self) -> Result<()> {
        if let Some(parent) = self.store_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create store directory '{}'", parent.display()),
                        e,
                    )
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.load_mode, LoadMode::Strict);
        assert_eq!(config.reload_policy, ReloadPolicy::IfEmpty);
        assert!(config.store_path.ends_with(DEFAULT_STORE_FILENAME));
    }

    #[test]
    fn test_env_values_override_defaults() {
        let mut config = Config::default();
        config.apply_env_values(
            Some("/data/species.csv".to_string()),
            Some("/data/species.db".to_string()),
        );
        assert_eq!(config.source_path, PathBuf::from("/data/species.csv"));
        assert_eq!(config.store_path, PathBuf::from("/data/species.db"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = Config::default();
        let original_store = config.store_path.clone();
        config.apply_env_values(Some("  ".to_string()), None);
        assert_eq!(config.source_path, PathBuf::from(DEFAULT_SOURCE_FILENAME));
        assert_eq!(config.store_path, original_store);
    }

    #[test]
    fn test_validate_rejects_bad_delimiter() {
        let mut config = Config::default();
        config.delimiter = '"';
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));

        config.delimiter = 'é';
        assert!(config.validate().is_err());

        config.delimiter = ';';
        assert!(config.validate().is_ok());
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn test_ensure_store_directory_creates_parent() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.store_path = temp_dir.path().join("nested").join("pokedex.db");

        config.ensure_store_directory().unwrap();
        assert!(temp_dir.path().join("nested").is_dir());
    }
}
