//! Ordered task collection.
//!
//! # Invariants
//! - Insertion order is preserved by every read.
//! - Duplicate ids are accepted; toggle and delete act on every match.

use crate::model::task::{Task, TaskStatus, TaskValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already persisted tasks without re-validating them.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Validates and appends a task. Ids are not checked for uniqueness.
    pub fn add(&mut self, task: Task) -> Result<(), TaskValidationError> {
        task.validate()?;
        self.tasks.push(task);
        Ok(())
    }

    /// Toggles every task carrying `id`.
    ///
    /// Returns the resulting status, or `None` when no task matched.
    pub fn toggle_status(&mut self, id: &str) -> Option<TaskStatus> {
        self.toggle_matching(|task| task.id == id)
    }

    /// Like [`Self::toggle_status`], restricted to tasks owned by `user_id`.
    pub fn toggle_status_for(&mut self, user_id: &str, id: &str) -> Option<TaskStatus> {
        self.toggle_matching(|task| task.id == id && task.user_id == user_id)
    }

    /// Removes every task carrying `id` and returns how many were removed.
    pub fn delete(&mut self, id: &str) -> usize {
        self.delete_matching(|task| task.id == id)
    }

    /// Like [`Self::delete`], restricted to tasks owned by `user_id`.
    pub fn delete_for(&mut self, user_id: &str, id: &str) -> usize {
        self.delete_matching(|task| task.id == id && task.user_id == user_id)
    }

    /// Tasks owned by `user_id`, in insertion order.
    pub fn filter_by_user(&self, user_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Calendar projection: a user's tasks on one day, ordered by start time.
    ///
    /// Unparsable start times sort last; ties keep insertion order.
    pub fn tasks_on_day(&self, user_id: &str, day: u32) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.user_id == user_id && task.date == day)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.start_minutes().unwrap_or(u32::MAX));
        tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn toggle_matching(&mut self, matches: impl Fn(&Task) -> bool) -> Option<TaskStatus> {
        let mut result = None;
        for task in self.tasks.iter_mut().filter(|task| matches(task)) {
            task.status = task.status.toggled();
            result = Some(task.status);
        }
        result
    }

    fn delete_matching(&mut self, matches: impl Fn(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !matches(task));
        before - self.tasks.len()
    }
}
