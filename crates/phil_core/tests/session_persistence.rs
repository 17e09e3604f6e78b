use chrono::{NaiveDate, NaiveDateTime};
use phil_core::db::open_db;
use phil_core::repo::blobs::{SETTINGS_KEY, TASKS_KEY};
use phil_core::{
    KeyValueStore, Session, SettingKey, SqliteKeyValueStore, Task, TaskCategory, TaskStatus, User,
};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn tasks_and_settings_survive_reopening_the_database() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");

    let mut session = open_session(&db_path, user("u1"));
    session.add_task(standup("t1", "u1")).unwrap();
    session
        .add_task(Task::new("t2", "u1", "Gym", "18:00", 14, TaskCategory::Health))
        .unwrap();
    session.toggle_task("t2").unwrap();
    session.delete_task("missing").unwrap();
    assert!(session.toggle_setting(SettingKey::DarkMode).unwrap());
    drop(session);

    let session = open_session(&db_path, user("u1"));
    let tasks = session.my_tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].reminder_minutes, Some(15));
    assert_eq!(tasks[1].status, TaskStatus::Done);
    assert!(session.settings().dark_mode);
    assert!(session.settings().notifications);
}

#[test]
fn fired_reminders_stay_fired_across_sessions_in_one_process() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");

    let mut session = open_session(&db_path, user("u1"));
    session.add_task(standup("t1", "u1")).unwrap();
    assert_eq!(session.evaluate(at(8, 45)).len(), 1);
    assert_eq!(session.feed().len(), 2);
    let (store, reminders) = session.into_parts();

    // log out and back in without restarting
    let mut session = Session::open_with_reminders(store, user("u1"), at(8, 45), reminders);
    assert_eq!(session.feed().len(), 1);
    assert!(session.has_fired("t1"));
    assert!(session.evaluate(at(8, 45)).is_empty());
    assert_eq!(session.feed().len(), 1);
}

#[test]
fn users_cannot_change_tasks_they_do_not_own() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");

    let mut owner = open_session(&db_path, user("u1"));
    owner.add_task(standup("t1", "u1")).unwrap();
    drop(owner);

    let mut intruder = open_session(&db_path, user("u2"));
    assert_eq!(intruder.toggle_task("t1").unwrap(), None);
    assert_eq!(intruder.delete_task("t1").unwrap(), 0);
    drop(intruder);

    let mut owner = open_session(&db_path, user("u1"));
    let tasks = owner.my_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::Todo);
    assert_eq!(owner.evaluate(at(8, 45)).len(), 1);
}

#[test]
fn colliding_ids_only_touch_the_active_users_task() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");

    let mut first = open_session(&db_path, user("u1"));
    first.add_task(standup("1700000000000", "u1")).unwrap();
    drop(first);

    let mut second = open_session(&db_path, user("u2"));
    second.add_task(standup("1700000000000", "u2")).unwrap();
    assert_eq!(second.toggle_task("1700000000000").unwrap(), Some(TaskStatus::Done));
    assert_eq!(second.delete_task("1700000000000").unwrap(), 1);
    assert!(second.my_tasks().is_empty());
    drop(second);

    let first = open_session(&db_path, user("u1"));
    let tasks = first.my_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::Todo);
}

#[test]
fn one_bad_task_entry_does_not_discard_the_others() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");
    {
        let mut store = SqliteKeyValueStore::new(open_db(&db_path).unwrap());
        let good = serde_json::to_value(standup("t1", "u1")).unwrap();
        let others = serde_json::to_value(standup("t9", "u2")).unwrap();
        let blob = serde_json::json!([good, {"id": 7, "title": null}, others]);
        store.put(TASKS_KEY, &blob.to_string()).unwrap();
        store.put(SETTINGS_KEY, r#"{"darkMode":true}"#).unwrap();
    }

    let mut session = open_session(&db_path, user("u1"));
    assert_eq!(session.my_tasks().len(), 1);
    let settings = session.settings();
    assert!(settings.dark_mode);
    assert!(settings.notifications);
    assert!(settings.calendar_sync);

    session.toggle_task("t1").unwrap();
    drop(session);

    let session = open_session(&db_path, user("u2"));
    let ids: Vec<String> = session.my_tasks().into_iter().map(|task| task.id).collect();
    assert_eq!(ids, vec!["t9"]);
}

#[test]
fn other_users_tasks_are_kept_but_not_shown() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");

    let mut session = open_session(&db_path, user("u1"));
    session
        .add_task(Task::new("mine", "u1", "Standup", "09:00", 14, TaskCategory::Work))
        .unwrap();
    drop(session);

    let mut session = open_session(&db_path, user("u2"));
    assert!(session.my_tasks().is_empty());
    session
        .add_task(Task::new("theirs", "u2", "Review", "10:00", 14, TaskCategory::Work))
        .unwrap();
    drop(session);

    let session = open_session(&db_path, user("u1"));
    let ids: Vec<String> = session.my_tasks().into_iter().map(|task| task.id).collect();
    assert_eq!(ids, vec!["mine"]);
}

#[test]
fn corrupt_blobs_fall_back_to_defaults_and_are_overwritten() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");
    {
        let mut store = SqliteKeyValueStore::new(open_db(&db_path).unwrap());
        store.put(TASKS_KEY, "{not json").unwrap();
        store.put(SETTINGS_KEY, "[]").unwrap();
    }

    let mut session = open_session(&db_path, user("u1"));
    assert!(session.my_tasks().is_empty());
    assert!(session.settings().notifications);
    assert!(!session.settings().dark_mode);

    session
        .add_task(Task::new("t1", "u1", "Standup", "09:00", 14, TaskCategory::Work))
        .unwrap();
    let store = session.into_store();
    let raw = store.get(TASKS_KEY).unwrap().unwrap();
    let decoded: Vec<Task> = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded.len(), 1);
}

#[test]
fn rejected_task_is_not_persisted() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("phil_reminder.sqlite3");

    let mut session = open_session(&db_path, user("u1"));
    let err = session
        .add_task(Task::new("t1", "u1", " ", "09:00", 14, TaskCategory::Work))
        .unwrap_err();
    assert_eq!(err.to_string(), "task title must not be empty");
    assert_eq!(session.store().get(TASKS_KEY).unwrap(), None);
}

fn open_session(db_path: &Path, user: User) -> Session<SqliteKeyValueStore> {
    let store = SqliteKeyValueStore::new(open_db(db_path).unwrap());
    Session::open(store, user, at(7, 0))
}

fn standup(id: &str, user_id: &str) -> Task {
    Task::new(id, user_id, "Standup", "09:00", 14, TaskCategory::Meeting).with_reminder(15)
}

fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {id}"),
        email: format!("{id}@example.com"),
        role: "Tester".to_string(),
        avatar: String::new(),
        password: None,
    }
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 14)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}
