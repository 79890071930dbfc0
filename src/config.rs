//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory, or `--config PATH`
//! 3. `CSVDUPE_*` environment variables (e.g. `CSVDUPE_DELIMITER=";"`)
//! 4. CLI flags, applied with [`Config::with_cli_overrides`]
//!
//! # Example file
//!
//! ```toml
//! delimiter = ";"
//! header = true
//! progress_interval = 50000
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::scanner::DEFAULT_DELIMITER;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "CSVDUPE_";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A provider failed to parse or a value had the wrong type.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] figment::Error),

    /// The delimiter cannot be a line ending.
    #[error("Invalid delimiter {0:?}: line endings cannot separate fields")]
    InvalidDelimiter(char),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field delimiter.
    pub delimiter: char,
    /// Treat the first line as a header row.
    pub header: bool,
    /// Rows between progress log lines when stderr is not a terminal.
    pub progress_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            header: false,
            progress_interval: 10_000,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise the default
    /// platform path is used when present and silently skipped when not.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing, any layer fails
    /// to parse, or the resulting values are invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => Self::default_path(),
        };

        if let Some(ref path) = path {
            log::debug!("Config file: {}", path.display());
        }

        let config: Self = Self::figment(path.as_deref()).extract()?;
        config.validate()
    }

    /// Build the figment for a given config file path.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Default platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "csvdupe", "csvdupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply CLI flags on top of the loaded configuration.
    #[must_use]
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(delimiter) = cli.delimiter {
            self.delimiter = delimiter;
        }
        if cli.header {
            self.header = true;
        }
        self
    }

    /// Check values figment cannot check by type alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDelimiter`] for `\n` or `\r`.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        Ok(self)
    }
}
