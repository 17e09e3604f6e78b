//! Explicit application session context.
//!
//! # Responsibility
//! - Own the task store, settings, notification feed and reminder state for
//!   one signed-in user.
//! - Write task and settings blobs back after each mutation.
//!
//! # Invariants
//! - Only the active user's tasks are handed to the reminder evaluator.
//! - Task mutations only reach tasks owned by the active user.
//! - The notification feed and fired-reminder set are never persisted. The
//!   fired set is handed from one session to the next within a process, so a
//!   reminder fires at most once per process.
//! - A new session's feed starts with a single welcome event.
//! - A failed blob write leaves the in-memory change applied.

use crate::model::notification::NotificationEvent;
use crate::model::settings::{AppSettings, SettingKey};
use crate::model::task::{Task, TaskStatus, TaskValidationError};
use crate::model::user::User;
use crate::reminder::evaluator::{self, ReminderState, Toast};
use crate::repo::blobs::{self, SETTINGS_KEY, TASKS_KEY};
use crate::repo::kv_repo::{KeyValueStore, RepoError};
use crate::store::notification_feed::NotificationFeed;
use crate::store::settings_store::SettingsStore;
use crate::store::task_store::TaskStore;
use chrono::NaiveDateTime;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session shared between user actions and the reminder scheduler.
pub type SharedSession<S> = Arc<Mutex<Session<S>>>;

#[derive(Debug)]
pub enum SessionError {
    Validation(TaskValidationError),
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for SessionError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

pub struct Session<S: KeyValueStore> {
    store: S,
    user: User,
    tasks: TaskStore,
    settings: SettingsStore,
    feed: NotificationFeed,
    reminders: ReminderState,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads persisted tasks and settings for `user` and seeds the feed.
    ///
    /// Absent or corrupt blobs fall back to an empty task list and default
    /// settings. Starts with an empty fired set; use
    /// [`Self::open_with_reminders`] to carry one over.
    pub fn open(store: S, user: User, now: NaiveDateTime) -> Self {
        Self::open_with_reminders(store, user, now, ReminderState::new())
    }

    /// Opens a session that continues an earlier session's fired set.
    pub fn open_with_reminders(
        store: S,
        user: User,
        now: NaiveDateTime,
        reminders: ReminderState,
    ) -> Self {
        let tasks: Vec<Task> = blobs::load_list(&store, TASKS_KEY);
        let settings: AppSettings = blobs::load_or_default(&store, SETTINGS_KEY);

        let mut session = Self {
            store,
            user,
            tasks: TaskStore::from_tasks(tasks),
            settings: SettingsStore::new(settings),
            feed: NotificationFeed::new(),
            reminders,
        };
        session.ensure_welcome(now);

        info!(
            "event=session_open module=session status=ok user_id={} task_count={} notifications={}",
            session.user.id,
            session.tasks.len(),
            session.settings.notifications_enabled()
        );
        session
    }

    /// Wraps the session for sharing with a scheduler.
    pub fn into_shared(self) -> SharedSession<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Validates, appends and persists a task.
    pub fn add_task(&mut self, task: Task) -> SessionResult<()> {
        let task_id = task.id.clone();
        self.tasks.add(task)?;
        self.persist_tasks()?;
        info!("event=task_add module=session status=ok task_id={}", task_id);
        Ok(())
    }

    /// Toggles one of the active user's tasks; `Ok(None)` when the user owns
    /// no task with that id.
    pub fn toggle_task(&mut self, task_id: &str) -> SessionResult<Option<TaskStatus>> {
        let Some(status) = self.tasks.toggle_status_for(&self.user.id, task_id) else {
            return Ok(None);
        };
        self.persist_tasks()?;
        info!(
            "event=task_toggle module=session status=ok task_id={} task_status={}",
            task_id,
            status.as_str()
        );
        Ok(Some(status))
    }

    /// Deletes one of the active user's tasks; an id the user does not own
    /// is a no-op returning `Ok(0)`.
    pub fn delete_task(&mut self, task_id: &str) -> SessionResult<usize> {
        let removed = self.tasks.delete_for(&self.user.id, task_id);
        if removed > 0 {
            self.persist_tasks()?;
            info!(
                "event=task_delete module=session status=ok task_id={} removed={}",
                task_id, removed
            );
        }
        Ok(removed)
    }

    /// Flips one preference flag, persists and returns its new value.
    pub fn toggle_setting(&mut self, key: SettingKey) -> SessionResult<bool> {
        let value = self.settings.toggle(key);
        blobs::save(&mut self.store, SETTINGS_KEY, &self.settings.snapshot())?;
        info!(
            "event=setting_toggle module=session status=ok key={} value={}",
            key.as_str(),
            value
        );
        Ok(value)
    }

    pub fn settings(&self) -> AppSettings {
        self.settings.snapshot()
    }

    /// Tasks owned by the active user, in insertion order.
    pub fn my_tasks(&self) -> Vec<Task> {
        self.tasks.filter_by_user(&self.user.id)
    }

    /// Calendar view of the active user's tasks on `day`.
    pub fn tasks_on_day(&self, day: u32) -> Vec<Task> {
        self.tasks.tasks_on_day(&self.user.id, day)
    }

    /// Runs one reminder tick against the active user's tasks.
    pub fn evaluate(&mut self, now: NaiveDateTime) -> Vec<NotificationEvent> {
        let candidates = self.tasks.filter_by_user(&self.user.id);
        evaluator::evaluate(
            now,
            &candidates,
            self.settings.notifications_enabled(),
            &mut self.reminders,
            &mut self.feed,
        )
    }

    pub fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    /// Seeds the welcome event when the feed is empty.
    pub fn ensure_welcome(&mut self, now: NaiveDateTime) -> bool {
        self.feed.seed_welcome_if_empty(&self.user.name, now)
    }

    pub fn clear_feed(&mut self) {
        self.feed.clear();
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.reminders.toast()
    }

    pub fn dismiss_toast(&mut self) -> Option<Toast> {
        self.reminders.dismiss_toast()
    }

    pub fn has_fired(&self, task_id: &str) -> bool {
        self.reminders.has_fired(task_id)
    }

    pub fn fired_count(&self) -> usize {
        self.reminders.fired_count()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ends the session, handing the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Ends the session, handing back the store and the fired set.
    pub fn into_parts(self) -> (S, ReminderState) {
        (self.store, self.reminders)
    }

    fn persist_tasks(&mut self) -> SessionResult<()> {
        if let Err(err) = blobs::save(&mut self.store, TASKS_KEY, self.tasks.all()) {
            warn!(
                "event=blob_save module=session status=error key={} error={}",
                TASKS_KEY, err
            );
            return Err(err.into());
        }
        Ok(())
    }
}
