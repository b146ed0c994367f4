//! Configuration loaded from the environment and command-line overrides.

use palabra_core::Mode;
use std::env;
use std::path::PathBuf;

/// Trainer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the data files
    pub data_dir: PathBuf,
    /// Local hour (0-23) at which a new study day begins
    pub daily_reset_hour: u32,
    /// Mode selected at startup and after reloading files
    pub start_mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            daily_reset_hour: 0,
            start_mode: Mode::NewWords,
        }
    }
}

impl Config {
    /// Load configuration from `PALABRA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("PALABRA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let daily_reset_hour = match lookup("PALABRA_DAILY_RESET_HOUR") {
            Some(raw) => parse_reset_hour(&raw)?,
            None => defaults.daily_reset_hour,
        };

        let start_mode = match lookup("PALABRA_START_MODE") {
            Some(raw) => Mode::from_str(&raw).ok_or(ConfigError::InvalidMode(raw))?,
            None => defaults.start_mode,
        };

        Ok(Self {
            data_dir,
            daily_reset_hour,
            start_mode,
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        reset_hour: Option<u32>,
        mode: Option<Mode>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(hour) = reset_hour {
            self.daily_reset_hour = check_reset_hour(hour)?;
        }
        if let Some(mode) = mode {
            self.start_mode = mode;
        }
        Ok(self)
    }
}

fn parse_reset_hour(raw: &str) -> Result<u32, ConfigError> {
    let hour = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidResetHour(raw.to_string()))?;
    check_reset_hour(hour)
}

fn check_reset_hour(hour: u32) -> Result<u32, ConfigError> {
    if hour > 23 {
        return Err(ConfigError::InvalidResetHour(hour.to_string()));
    }
    Ok(hour)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid daily reset hour '{0}' (expected 0-23)")]
    InvalidResetHour(String),

    #[error("invalid start mode '{0}' (expected new, review, 5day, 15day or today)")]
    InvalidMode(String),
}
