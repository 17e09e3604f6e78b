//! Process-wide diagnostic logging.
//!
//! # Responsibility
//! - Start the rolling `phil_reminder` log files once per process.
//! - Route panics through the logger before the default hook runs.
//!
//! # Invariants
//! - Records carry ids, counts and status codes only; task titles, messages
//!   and credentials stay out of the log.
//! - A second `init_logging` call with the same level and directory is a no-op;
//!   any other combination is rejected instead of silently reconfiguring.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_BASENAME: &str = "phil_reminder";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_FILES: usize = 5;
const PANIC_TEXT_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LogLevel,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Verbosity accepted by `PHIL_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `debug` in debug builds, `info` otherwise.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    fn filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::Trace,
            Self::Debug => LevelFilter::Debug,
            Self::Info => LevelFilter::Info,
            Self::Warn => LevelFilter::Warn,
            Self::Error => LevelFilter::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LoggingError::UnknownLevel(value.trim().to_string())),
        }
    }
}

#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    RelativeDir(PathBuf),
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    Start(flexi_logger::FlexiLoggerError),
    /// Logging is already running with another level or directory.
    AlreadyActive { level: LogLevel, dir: PathBuf },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(raw) => write!(
                f,
                "unknown log level `{raw}`, expected trace|debug|info|warn|error"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Start(err) => write!(f, "cannot start logger: {err}"),
            Self::AlreadyActive { level, dir } => write!(
                f,
                "logging already active at level {} in `{}`",
                level.as_str(),
                dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Start(err) => Some(err),
            _ => None,
        }
    }
}

/// Starts file logging under `dir`.
///
/// # Errors
/// - `RelativeDir` when `dir` is not absolute.
/// - `CreateDir` or `Start` when the backend cannot be brought up.
/// - `AlreadyActive` when a different configuration is already running.
pub fn init_logging(level: LogLevel, dir: &Path) -> Result<(), LoggingError> {
    if !dir.is_absolute() {
        return Err(LoggingError::RelativeDir(dir.to_path_buf()));
    }

    let active = ACTIVE.get_or_try_init(|| start_logger(level, dir))?;
    if active.level != level || active.dir != dir {
        return Err(LoggingError::AlreadyActive {
            level: active.level,
            dir: active.dir.clone(),
        });
    }
    Ok(())
}

/// Level and directory of the running logger, if any.
pub fn logging_status() -> Option<(LogLevel, PathBuf)> {
    ACTIVE.get().map(|active| (active.level, active.dir.clone()))
}

fn start_logger(level: LogLevel, dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let spec = LogSpecification::builder().default(level.filter()).build();
    let handle = Logger::with(spec)
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LoggingError::Start)?;

    route_panics_to_log();
    info!(
        "event=logging_start module=logging status=ok level={} os={} version={}",
        level.as_str(),
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

// Runs at most once: only reachable from the `ACTIVE` initializer.
fn route_panics_to_log() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let at = panic
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic
            .payload()
            .downcast_ref::<&str>()
            .map(|text| (*text).to_string())
            .or_else(|| panic.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-text payload>".to_string());

        error!(
            "event=panic module=logging status=error at={} payload={}",
            at,
            single_line(&payload, PANIC_TEXT_LIMIT)
        );
        default_hook(panic);
    }));
}

/// Collapses line breaks and clips `text` to `limit` characters.
fn single_line(text: &str, limit: usize) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut clipped: String = flat.chars().take(limit).collect();
    clipped.push_str("...");
    clipped
}
