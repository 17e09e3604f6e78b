//! Runtime configuration assembled from defaults and environment variables.
//!
//! # Responsibility
//! - Resolve the data directory, log level and reminder tick intervals.
//!
//! # Invariants
//! - `data_dir` is always absolute (the logger rejects relative paths).
//! - Tick intervals are never zero.

use crate::logging::LogLevel;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Overrides the data directory holding the database and logs.
pub const ENV_DATA_DIR: &str = "PHIL_DATA_DIR";
/// Overrides the log level (`trace|debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "PHIL_LOG_LEVEL";
/// Overrides the reminder evaluation period in whole seconds.
pub const ENV_TICK_SECS: &str = "PHIL_TICK_SECS";

const DB_FILE_NAME: &str = "phil_reminder.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_EVALUATE_EVERY: Duration = Duration::from_secs(5);
const DEFAULT_CLOCK_EVERY: Duration = Duration::from_secs(1);

/// Timer periods for the reminder scheduler.
///
/// `evaluate_every` must stay well below one minute, otherwise the
/// exact-minute match can be skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderConfig {
    pub evaluate_every: Duration,
    pub clock_every: Duration,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            evaluate_every: DEFAULT_EVALUATE_EVERY,
            clock_every: DEFAULT_CLOCK_EVERY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub log_level: LogLevel,
    pub reminder: ReminderConfig,
}

impl RuntimeConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(ENV_DATA_DIR).filter(|value| !value.trim().is_empty()) {
            Some(raw) => {
                let path = PathBuf::from(raw.trim());
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeDataDir(path));
                }
                path
            }
            None => std::env::temp_dir().join("phil_reminder"),
        };

        let log_level = match lookup(ENV_LOG_LEVEL) {
            Some(raw) => raw
                .parse::<LogLevel>()
                .map_err(|_| ConfigError::InvalidLogLevel(raw.clone()))?,
            None => LogLevel::for_build(),
        };

        let mut reminder = ReminderConfig::default();
        if let Some(raw) = lookup(ENV_TICK_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| (1..60).contains(secs))
                .ok_or_else(|| ConfigError::InvalidTickSecs(raw.clone()))?;
            reminder.evaluate_every = Duration::from_secs(secs);
        }

        Ok(Self {
            data_dir,
            log_level,
            reminder,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeDataDir(PathBuf),
    InvalidLogLevel(String),
    InvalidTickSecs(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeDataDir(path) => write!(
                f,
                "{ENV_DATA_DIR} must be an absolute path, got `{}`",
                path.display()
            ),
            Self::InvalidLogLevel(raw) => write!(
                f,
                "{ENV_LOG_LEVEL} must be one of trace|debug|info|warn|error, got `{raw}`"
            ),
            Self::InvalidTickSecs(raw) => {
                write!(f, "{ENV_TICK_SECS} must be a whole number in 1..60, got `{raw}`")
            }
        }
    }
}

impl Error for ConfigError {}
