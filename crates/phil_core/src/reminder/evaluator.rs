//! Reminder trigger evaluation.
//!
//! # Responsibility
//! - Compare the current minute against each task's reminder minute.
//! - Record fired task ids, push feed events and overwrite the toast slot.
//!
//! # Invariants
//! - Evaluation is a no-op while notifications are disabled.
//! - Firings within one tick follow task iteration order; the toast ends up
//!   holding the last one while the feed receives all of them.
//! - Exact-minute equality: a tick that skips the target minute never fires
//!   for that day.

use crate::model::notification::NotificationEvent;
use crate::model::task::{Task, TaskId};
use crate::store::notification_feed::NotificationFeed;
use chrono::{Datelike, NaiveDateTime, Timelike};
use log::{debug, info};
use std::collections::HashSet;

/// The single on-screen toast. A newer firing replaces an unread one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub task_id: TaskId,
    pub message: String,
    pub shown_at: NaiveDateTime,
}

/// Per-session reminder bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct ReminderState {
    fired: HashSet<TaskId>,
    toast: Option<Toast>,
}

impl ReminderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self, task_id: &str) -> bool {
        self.fired.contains(task_id)
    }

    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Clears the toast slot and returns what was shown.
    pub fn dismiss_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }
}

/// Returns whether `task` is due at `now`, ignoring de-duplication and settings.
pub fn is_due(task: &Task, now: NaiveDateTime) -> bool {
    if task.is_done() {
        return false;
    }
    let lead = match task.reminder_minutes {
        Some(lead) if lead > 0 => lead,
        _ => return false,
    };
    if task.date != now.day() {
        return false;
    }
    let Some(start) = task.start_minutes() else {
        debug!(
            "event=reminder_skip module=reminder status=skip task_id={} reason=malformed_start_time",
            task.id
        );
        return false;
    };

    let reminder_minute = i64::from(start) - i64::from(lead);
    let current_minute = i64::from(now.hour() * 60 + now.minute());
    current_minute == reminder_minute
}

/// Runs one evaluation tick and returns the events it produced, in firing order.
pub fn evaluate(
    now: NaiveDateTime,
    tasks: &[Task],
    notifications_enabled: bool,
    state: &mut ReminderState,
    feed: &mut NotificationFeed,
) -> Vec<NotificationEvent> {
    if !notifications_enabled {
        return Vec::new();
    }

    let mut produced = Vec::new();
    for task in tasks {
        if state.fired.contains(&task.id) || !is_due(task, now) {
            continue;
        }

        state.fired.insert(task.id.clone());
        let message = reminder_message(task);
        let event = NotificationEvent::new(message.clone(), now);
        feed.push(event.clone());
        state.toast = Some(Toast {
            task_id: task.id.clone(),
            message,
            shown_at: now,
        });

        info!(
            "event=reminder_fired module=reminder status=ok task_id={} notification_id={}",
            task.id, event.id
        );
        produced.push(event);
    }

    produced
}

/// User-facing reminder text.
pub fn reminder_message(task: &Task) -> String {
    let lead = task.reminder_minutes.unwrap_or_default();
    let unit = if lead == 1 { "minute" } else { "minutes" };
    format!(
        "Reminder: \"{}\" starts in {} {} at {}",
        task.title, lead, unit, task.start_time
    )
}
