//! Typed access to the persisted JSON blobs.
//!
//! # Invariants
//! - Key names are stable; renaming one orphans existing data.
//! - Decoding never fails: absent, unreadable or corrupt blobs yield `T::default()`.
//! - List blobs are decoded per element so one bad entry does not discard the rest.

use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Settings flags blob.
pub const SETTINGS_KEY: &str = "phil_settings";
/// Task list blob (all users).
pub const TASKS_KEY: &str = "phil_tasks";
/// Signed-in user blob.
pub const CURRENT_USER_KEY: &str = "phil_current_user";
/// Registered users blob.
pub const USERS_KEY: &str = "phil_users";

/// Loads and decodes a blob, falling back to the default on any failure.
pub fn load_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    load_optional(store, key).unwrap_or_default()
}

/// Loads and decodes a blob, returning `None` when absent or unusable.
pub fn load_optional<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(
                "event=blob_load module=repo status=error key={} error_code=read_failed error={}",
                key, err
            );
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "event=blob_load module=repo status=fallback key={} error_code=corrupt_blob error={}",
                key, err
            );
            None
        }
    }
}

/// Loads a JSON array blob, skipping elements that fail to decode.
///
/// A blob that is not an array at all reads as empty.
pub fn load_list<S, T>(store: &S, key: &str) -> Vec<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(items) = load_optional::<S, Vec<serde_json::Value>>(store, key) else {
        return Vec::new();
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if decoded.len() < total {
        warn!(
            "event=blob_load module=repo status=partial key={} error_code=corrupt_entries skipped={}",
            key,
            total - decoded.len()
        );
    }
    decoded
}

/// Encodes and writes a blob.
pub fn save<S, T>(store: &mut S, key: &str, value: &T) -> RepoResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(|source| RepoError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.put(key, &encoded)
}
