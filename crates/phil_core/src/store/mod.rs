//! In-memory stores owned by a session.
//!
//! # Responsibility
//! - Hold task, settings and notification state between ticks.
//! - Keep mutation rules (toggle, delete, seeding) in one place.
//!
//! # Invariants
//! - Stores never persist by themselves; `Session` writes blobs after mutations.

pub mod notification_feed;
pub mod settings_store;
pub mod task_store;
