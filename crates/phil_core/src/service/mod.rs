//! Use-case services that sit beside the session.
//!
//! # Responsibility
//! - Sign users in before a session exists.
//! - Wrap the optional advisor behind a never-failing API.

pub mod advisor;
pub mod auth_service;
