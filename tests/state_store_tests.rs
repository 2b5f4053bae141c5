use spoon::state::{SelectionState, StateStore};
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_state_gives_defaults() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path().join("last_selection.json"));
    let state = store.load();

    assert!(state.selected_files.is_empty());
    assert!(!state.select_all);
    assert_eq!(state.file_extension, ".py");
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path().join("nested/cache/last_selection.json"));
    let state = SelectionState {
        selected_files: ["a/x.py", "b/z.py"].iter().map(|s| s.to_string()).collect(),
        select_all: true,
        file_extension: ".rs".to_string(),
    };

    store.save(&state).unwrap();
    assert_eq!(store.load(), state);
}

#[test]
fn test_save_replaces_previous_state() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state.json"));
    let mut state = SelectionState::default();
    state.selected_files.insert("old.py".to_string());
    store.save(&state).unwrap();

    let replacement = SelectionState {
        selected_files: BTreeSet::from(["new.py".to_string()]),
        ..SelectionState::default()
    };
    store.save(&replacement).unwrap();

    assert_eq!(
        store.load().selected_files,
        BTreeSet::from(["new.py".to_string()])
    );
}

#[test]
fn test_corrupt_state_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "not json at all {").unwrap();

    assert_eq!(StateStore::new(path).load(), SelectionState::default());
}

#[test]
fn test_partial_state_fills_missing_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, r#"{"selected_files": ["main.py"]}"#).unwrap();

    let state = StateStore::new(path).load();
    assert!(state.selected_files.contains("main.py"));
    assert!(!state.select_all);
    assert_eq!(state.file_extension, ".py");
}

#[test]
fn test_clear_removes_state() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state.json"));
    store.save(&SelectionState::default()).unwrap();
    assert!(store.path().exists());

    store.clear().unwrap();
    assert!(!store.path().exists());
    // Clearing twice is fine.
    store.clear().unwrap();
}
