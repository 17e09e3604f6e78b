use phil_core::store::task_store::TaskStore;
use phil_core::{Task, TaskCategory, TaskStatus, TaskValidationError};

fn task(id: &str, user_id: &str, start: &str, day: u32) -> Task {
    Task::new(id, user_id, format!("task {id}"), start, day, TaskCategory::Work)
}

#[test]
fn toggling_twice_restores_todo_and_done() {
    let mut store = TaskStore::new();
    store.add(task("a", "u1", "09:00", 3)).unwrap();
    store
        .add(task("b", "u1", "10:00", 3).with_status(TaskStatus::Done))
        .unwrap();

    assert_eq!(store.toggle_status("a"), Some(TaskStatus::Done));
    assert_eq!(store.toggle_status("a"), Some(TaskStatus::Todo));
    assert_eq!(store.toggle_status("b"), Some(TaskStatus::Todo));
    assert_eq!(store.toggle_status("b"), Some(TaskStatus::Done));
}

#[test]
fn toggling_in_progress_once_yields_done() {
    let mut store = TaskStore::new();
    store
        .add(task("a", "u1", "09:00", 3).with_status(TaskStatus::InProgress))
        .unwrap();

    assert_eq!(store.toggle_status("a"), Some(TaskStatus::Done));
    assert_eq!(store.get("a").unwrap().status, TaskStatus::Done);
}

#[test]
fn toggling_unknown_id_changes_nothing() {
    let mut store = TaskStore::new();
    store.add(task("a", "u1", "09:00", 3)).unwrap();
    let before = store.clone();

    assert_eq!(store.toggle_status("missing"), None);
    assert_eq!(store, before);
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let mut store = TaskStore::new();
    store.add(task("a", "u1", "09:00", 3)).unwrap();

    assert_eq!(store.delete("missing"), 0);
    assert_eq!(store.len(), 1);

    assert_eq!(store.delete("a"), 1);
    assert_eq!(store.delete("a"), 0);
    assert!(store.is_empty());
}

#[test]
fn duplicate_ids_are_accepted_and_acted_on_together() {
    let mut store = TaskStore::new();
    store.add(task("dup", "u1", "09:00", 3)).unwrap();
    store.add(task("dup", "u1", "11:00", 3)).unwrap();
    assert_eq!(store.len(), 2);

    store.toggle_status("dup");
    assert!(store.all().iter().all(|task| task.status == TaskStatus::Done));

    assert_eq!(store.delete("dup"), 2);
    assert!(store.is_empty());
}

#[test]
fn filter_by_user_preserves_insertion_order() {
    let mut store = TaskStore::new();
    store.add(task("c", "u1", "12:00", 3)).unwrap();
    store.add(task("x", "u2", "08:00", 3)).unwrap();
    store.add(task("a", "u1", "07:00", 4)).unwrap();

    let ids: Vec<String> = store
        .filter_by_user("u1")
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(ids, vec!["c", "a"]);
    assert!(store.filter_by_user("nobody").is_empty());
}

#[test]
fn tasks_on_day_sorts_by_start_with_malformed_last() {
    let mut store = TaskStore::new();
    store.add(task("late", "u1", "17:00", 9)).unwrap();
    store.add(task("broken", "u1", "soon", 9)).unwrap();
    store.add(task("early", "u1", "7:30", 9)).unwrap();
    store.add(task("other-day", "u1", "06:00", 10)).unwrap();
    store.add(task("other-user", "u2", "06:00", 9)).unwrap();

    let ids: Vec<String> = store
        .tasks_on_day("u1", 9)
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(ids, vec!["early", "late", "broken"]);
}

#[test]
fn add_rejects_invalid_tasks() {
    let mut store = TaskStore::new();

    let err = store.add(task("a", "u1", "09:00", 32)).unwrap_err();
    assert_eq!(err, TaskValidationError::DayOutOfRange(32));

    let mut blank = task("b", "u1", "09:00", 1);
    blank.title = String::new();
    assert_eq!(store.add(blank).unwrap_err(), TaskValidationError::EmptyTitle);
    assert!(store.is_empty());
}

#[test]
fn owner_scoped_toggle_and_delete_skip_other_users() {
    let mut store = TaskStore::new();
    store.add(task("shared-id", "u1", "09:00", 3)).unwrap();
    store.add(task("shared-id", "u2", "09:00", 3)).unwrap();

    assert_eq!(store.toggle_status_for("u3", "shared-id"), None);
    assert_eq!(store.toggle_status_for("u2", "shared-id"), Some(TaskStatus::Done));
    assert_eq!(store.filter_by_user("u1")[0].status, TaskStatus::Todo);

    assert_eq!(store.delete_for("u3", "shared-id"), 0);
    assert_eq!(store.delete_for("u2", "shared-id"), 1);
    let owners: Vec<String> = store.all().iter().map(|task| task.user_id.clone()).collect();
    assert_eq!(owners, vec!["u1"]);
}
