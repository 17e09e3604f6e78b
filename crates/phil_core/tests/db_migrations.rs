use phil_core::db::migrations::{migrate, schema_version, target_version};
use phil_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn in_memory_database_is_migrated_on_open() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), target_version());
    assert_eq!(kv_columns(&conn), vec!["key", "value", "updated_at"]);
}

#[test]
fn reopening_a_file_keeps_blobs_and_runs_no_steps() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");

    let conn = open_db(&db_path).unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES ('phil_tasks', '[]')",
        [],
    )
    .unwrap();
    drop(conn);

    let mut reopened = open_db(&db_path).unwrap();
    assert_eq!(migrate(&mut reopened).unwrap(), 0);
    let stored: String = reopened
        .query_row(
            "SELECT value FROM kv_entries WHERE key = 'phil_tasks'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, "[]");
}

#[test]
fn missing_data_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("a").join("b").join("phil_reminder.sqlite3");

    open_db(&db_path).unwrap();
    assert!(db_path.is_file());
}

#[test]
fn file_in_place_of_data_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let occupied = dir.path().join("occupied");
    std::fs::write(&occupied, b"not a directory").unwrap();

    let err = open_db(occupied.join("phil_reminder.sqlite3")).unwrap_err();
    assert!(matches!(err, DbError::CreateDir { .. }));
}

#[test]
fn database_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");
    Connection::open(&db_path)
        .unwrap()
        .pragma_update(None, "user_version", 42)
        .unwrap();

    match open_db(&db_path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 42);
            assert_eq!(supported, target_version());
        }
        other => panic!("expected SchemaTooNew, got {other}"),
    }
}

fn kv_columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(kv_entries)").unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}
