use super::migrations::migrate;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the database file at `path`, creating missing parent
/// directories, and brings its schema up to date.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| DbError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        })?;
    }
    prepare("file", Connection::open(path))
}

/// Migrated private in-memory database, used by tests and dry runs.
pub fn open_db_in_memory() -> DbResult<Connection> {
    prepare("memory", Connection::open_in_memory())
}

fn prepare(mode: &str, opened: rusqlite::Result<Connection>) -> DbResult<Connection> {
    let started = Instant::now();
    let result = opened.map_err(DbError::from).and_then(|mut conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let applied = migrate(&mut conn)?;
        Ok((conn, applied))
    });

    match result {
        Ok((conn, applied)) => {
            info!(
                "event=db_open module=db status=ok mode={} migrations_applied={} duration_ms={}",
                mode,
                applied,
                started.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error={}",
                mode,
                started.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
