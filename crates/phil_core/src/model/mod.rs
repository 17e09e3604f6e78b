//! Domain model for tasks, settings, users and notifications.
//!
//! # Responsibility
//! - Define the records persisted in key-value blobs and the events produced
//!   by the reminder pipeline.
//!
//! # Invariants
//! - Serialized field names match the blob schema (camelCase).
//! - Notification events are immutable once produced.

pub mod notification;
pub mod settings;
pub mod task;
pub mod user;
