//! Reminder pipeline: time matching, de-duplication and timer lifecycle.
//!
//! # Responsibility
//! - Decide which tasks are due at a given wall-clock minute.
//! - Drive periodic evaluation and clock refresh with explicit start/stop.
//!
//! # Invariants
//! - A done task never produces a reminder.
//! - A task id fires at most once per session (no un-fire operation).
//! - Matching is exact-minute equality on the task's day-of-month.

pub mod clock;
pub mod evaluator;
pub mod scheduler;
