//! Key-value persistence contracts and implementations.
//!
//! # Responsibility
//! - Store named text blobs (settings, tasks, users, current user).
//! - Decode blobs into typed records with default fallback.
//!
//! # Invariants
//! - A missing or corrupt blob reads as the record's default, never an error.
//! - Write failures are surfaced to callers.

pub mod blobs;
pub mod kv_repo;
