//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record shared by dashboard, calendar and
//!   reminder projections.
//! - Parse `HH:MM` clock text into minutes-of-day for reminder matching.
//!
//! # Invariants
//! - `title` is non-empty after trimming.
//! - `date` is a day-of-month in `1..=31`; month and year are not modeled.
//! - `start_time` is kept as raw text; an unparsable value never matches a
//!   reminder tick instead of failing the whole task list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static CLOCK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("valid clock time regex"));

/// Stable identifier of a task. Opaque to core; uniqueness is not enforced.
pub type TaskId = String;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Status reached by a single toggle.
    ///
    /// Only `done` flips back to `todo`; both `todo` and `in-progress` move to
    /// `done`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Done => Self::Todo,
            Self::Todo | Self::InProgress => Self::Done,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

/// Display category of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Work,
    Personal,
    Meeting,
    Health,
}

/// Persisted task record. Field names follow the `phil_tasks` blob schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Owner user id.
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local wall-clock start in `HH:MM` form.
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Day of month the task is scheduled on.
    pub date: u32,
    pub category: TaskCategory,
    pub status: TaskStatus,
    /// Free-form duration label such as `1h 30m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Minutes before `start_time` to remind; `None` disables reminders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<u32>,
}

impl Task {
    /// Creates a `todo` task with no optional fields set.
    pub fn new(
        id: impl Into<TaskId>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        start_time: impl Into<String>,
        date: u32,
        category: TaskCategory,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            start_time: start_time.into(),
            end_time: None,
            date,
            category,
            status: TaskStatus::Todo,
            duration: None,
            reminder_minutes: None,
        }
    }

    /// Builder-style helper for setting the reminder lead time.
    pub fn with_reminder(mut self, minutes: u32) -> Self {
        self.reminder_minutes = Some(minutes);
        self
    }

    /// Builder-style helper for setting the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Minutes since midnight of `start_time`, or `None` when unparsable.
    pub fn start_minutes(&self) -> Option<u32> {
        parse_clock_minutes(&self.start_time)
    }

    /// Returns whether the task is finished.
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Validates invariants enforced before a task enters the store.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if !(1..=31).contains(&self.date) {
            return Err(TaskValidationError::DayOutOfRange(self.date));
        }
        Ok(())
    }
}

/// Parses `HH:MM` into minutes since midnight.
///
/// Hours must be `0..=23` and minutes `0..=59`.
pub fn parse_clock_minutes(value: &str) -> Option<u32> {
    let captures = CLOCK_TIME_RE.captures(value)?;
    let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
    let minute: u32 = captures.get(2)?.as_str().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Validation errors for task writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    DayOutOfRange(u32),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::DayOutOfRange(day) => {
                write!(f, "task date must be a day of month in 1..=31, got {day}")
            }
        }
    }
}

impl Error for TaskValidationError {}

#[cfg(test)]
mod tests {
    use super::{parse_clock_minutes, Task, TaskCategory, TaskStatus, TaskValidationError};

    #[test]
    fn parse_clock_minutes_accepts_padded_and_unpadded_hours() {
        assert_eq!(parse_clock_minutes("09:00"), Some(540));
        assert_eq!(parse_clock_minutes("9:05"), Some(545));
        assert_eq!(parse_clock_minutes("23:59"), Some(1439));
    }

    #[test]
    fn parse_clock_minutes_rejects_malformed_values() {
        assert_eq!(parse_clock_minutes(""), None);
        assert_eq!(parse_clock_minutes("24:00"), None);
        assert_eq!(parse_clock_minutes("10:60"), None);
        assert_eq!(parse_clock_minutes("10am"), None);
        assert_eq!(parse_clock_minutes("10:5"), None);
    }

    #[test]
    fn toggled_swaps_todo_and_done_and_finishes_in_progress() {
        assert_eq!(TaskStatus::Todo.toggled(), TaskStatus::Done);
        assert_eq!(TaskStatus::Done.toggled(), TaskStatus::Todo);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Done);
    }

    #[test]
    fn validate_rejects_blank_title_and_bad_day() {
        let task = Task::new("t1", "u1", "  ", "09:00", 12, TaskCategory::Work);
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));

        let task = Task::new("t1", "u1", "Standup", "09:00", 0, TaskCategory::Work);
        assert_eq!(task.validate(), Err(TaskValidationError::DayOutOfRange(0)));
    }

    #[test]
    fn serializes_with_blob_field_names() {
        let task = Task::new("t1", "u1", "Standup", "09:00", 12, TaskCategory::Meeting)
            .with_status(TaskStatus::InProgress)
            .with_reminder(15);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["userId"], "u1");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["category"], "meeting");
        assert_eq!(json["reminderMinutes"], 15);
        assert!(json.get("description").is_none());
    }
}
