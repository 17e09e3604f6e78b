//! Core domain logic for Phil Reminder.
//! This crate is the single source of truth for reminder and task invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod repo;
pub mod service;
pub mod session;
pub mod store;

pub use config::{ConfigError, ReminderConfig, RuntimeConfig};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::notification::NotificationEvent;
pub use model::settings::{AppSettings, SettingKey, UnknownSettingKey};
pub use model::task::{Task, TaskCategory, TaskId, TaskStatus, TaskValidationError};
pub use model::user::User;
pub use reminder::clock::{Clock, ManualClock, SystemClock};
pub use reminder::evaluator::{ReminderState, Toast};
pub use reminder::scheduler::{ReminderScheduler, SchedulerError};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::advisor::{
    AdvisorError, AdvisorRequest, AdvisorService, TaskAdvisor, TaskSuggestion,
};
pub use service::auth_service::{AuthError, AuthService, SignUpRequest};
pub use session::{Session, SessionError, SharedSession};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
