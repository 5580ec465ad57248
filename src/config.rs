//! Configuration loading.
//!
//! All settings have defaults, so an empty or missing file yields a usable
//! configuration rooted at the current directory.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HangoutsConfig {
    /// Application-private directory holding the database and avatars.
    pub data_dir: Utf8PathBuf,

    /// Database file name, relative to `data_dir`.
    pub database_file: Utf8PathBuf,

    /// Avatar directory, relative to `data_dir`.
    pub avatar_dir: Utf8PathBuf,

    /// Maximum number of pooled database connections.
    pub pool_size: u32,

    /// How long a connection waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Number of inbound SMS events buffered before senders wait.
    pub inbound_queue_capacity: usize,
}

impl Default for HangoutsConfig {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from("."),
            database_file: Utf8PathBuf::from("hangouts.db"),
            avatar_dir: Utf8PathBuf::from("avatars"),
            pool_size: 4,
            busy_timeout_ms: 5_000,
            inbound_queue_capacity: 64,
        }
    }
}

impl HangoutsConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Returns a configuration rooted at `data_dir` with default settings.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Returns the full path of the database file.
    #[must_use]
    pub fn database_path(&self) -> Utf8PathBuf {
        self.data_dir.join(&self.database_file)
    }

    /// Returns the full path of the avatar directory.
    #[must_use]
    pub fn avatar_path(&self) -> Utf8PathBuf {
        self.data_dir.join(&self.avatar_dir)
    }
}
