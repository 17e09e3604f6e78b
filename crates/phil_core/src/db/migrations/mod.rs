//! Ordered schema steps, tracked through `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// `(version, sql)` pairs; versions are strictly increasing from 1.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_entries.sql"))];

/// Schema version this build writes.
pub fn target_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Schema version recorded in the open database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Applies every step above the recorded version in one transaction and
/// returns how many ran.
pub fn migrate(conn: &mut Connection) -> DbResult<usize> {
    let found = schema_version(conn)?;
    let supported = target_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<&(u32, &str)> = STEPS.iter().filter(|(version, _)| *version > found).collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (version, sql) in &pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;
    Ok(pending.len())
}
