use spoon::clipboard::{ClipboardSink, MemoryClipboard};
use spoon::state::{SelectionState, StateStore};
use spoon::{CheckState, Session, SpoonConfig, SpoonError, TitleMode};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use tracing_test::traced_test;

struct BrokenClipboard;

impl ClipboardSink for BrokenClipboard {
    fn set_text(&mut self, _text: String) -> Result<(), SpoonError> {
        Err(SpoonError::ClipboardWriteError("no display".to_string()))
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitignore", "build/\n");
    write(root, "a/x.py", "x = 1");
    write(root, "a/y.py", "y = 2");
    write(root, "a/notes.md", "notes");
    write(root, "b/z.py", "z = 3");
    write(root, "build/out.py", "out");
    dir
}

fn config(project: &TempDir, state_dir: &TempDir) -> SpoonConfig {
    SpoonConfig {
        root: project.path().to_path_buf(),
        state_path: state_path(state_dir),
        ..SpoonConfig::default()
    }
}

fn state_path(state_dir: &TempDir) -> PathBuf {
    state_dir.path().join("spoon/last_selection.json")
}

#[test]
fn test_open_without_state_uses_defaults() {
    let project = project();
    let state_dir = tempdir().unwrap();
    let session = Session::open(config(&project, &state_dir));

    assert_eq!(session.extension(), ".py");
    assert!(!session.select_all());
    assert_eq!(session.tree().leaf_paths(), vec!["a/x.py", "a/y.py", "b/z.py"]);
    assert_eq!(session.aggregate_state(), CheckState::Unchecked);
}

#[tokio::test]
async fn test_submit_without_selection_does_nothing() {
    let project = project();
    let state_dir = tempdir().unwrap();
    let mut session = Session::open(config(&project, &state_dir));
    let mut clipboard = MemoryClipboard::default();

    let result = session.submit(&mut clipboard).await.unwrap();
    assert!(result.is_none());
    assert!(clipboard.contents.is_none());
    assert!(!state_path(&state_dir).exists());
}

#[tokio::test]
async fn test_submit_copies_and_saves_selection() {
    let project = project();
    let state_dir = tempdir().unwrap();
    let mut session = Session::open(config(&project, &state_dir));
    session.set_checked("a", true).unwrap();
    assert_eq!(session.aggregate_state(), CheckState::PartiallyChecked);

    let mut clipboard = MemoryClipboard::default();
    let exported = session.submit(&mut clipboard).await.unwrap().unwrap();
    assert_eq!(exported.len(), 2);
    assert_eq!(
        clipboard.contents.as_deref(),
        Some("# x.py\nx = 1\n\n# y.py\ny = 2")
    );

    let saved = StateStore::new(state_path(&state_dir)).load();
    let files: Vec<&str> = saved.selected_files.iter().map(String::as_str).collect();
    assert_eq!(files, vec!["a/x.py", "a/y.py"]);
    assert!(!saved.select_all);
    assert_eq!(saved.file_extension, ".py");

    let reopened = Session::open(config(&project, &state_dir));
    assert_eq!(reopened.tree().checked_files(), vec!["a/x.py", "a/y.py"]);
    let a = reopened.tree().find("a").unwrap();
    assert_eq!(reopened.tree().state(a), CheckState::Checked);
}

#[tokio::test]
async fn test_full_path_titles_from_config() {
    let project = project();
    let state_dir = tempdir().unwrap();
    let mut config = config(&project, &state_dir);
    config.title_mode = TitleMode::RelativePath;
    let mut session = Session::open(config);
    session.set_checked("b/z.py", true).unwrap();

    let mut clipboard = MemoryClipboard::default();
    session.submit(&mut clipboard).await.unwrap();
    assert_eq!(clipboard.contents.as_deref(), Some("# b/z.py\nz = 3"));
}

#[tokio::test]
async fn test_extension_switch_keeps_other_selections_persisted() {
    let project = project();
    let state_dir = tempdir().unwrap();

    let mut session = Session::open(config(&project, &state_dir));
    session.set_checked("a/x.py", true).unwrap();
    session.submit(&mut MemoryClipboard::default()).await.unwrap();

    let mut session = Session::open(config(&project, &state_dir));
    session.set_extension("md");
    assert_eq!(session.extension(), ".md");
    assert_eq!(session.tree().leaf_paths(), vec!["a/notes.md"]);
    assert!(session.tree().find("a/x.py").is_none());
    assert!(session.tree().checked_files().is_empty());

    session.set_checked("a/notes.md", true).unwrap();
    let mut clipboard = MemoryClipboard::default();
    session.submit(&mut clipboard).await.unwrap();
    assert_eq!(clipboard.contents.as_deref(), Some("# notes.md\nnotes"));

    let saved = StateStore::new(state_path(&state_dir)).load();
    assert!(saved.selected_files.contains("a/x.py"));
    assert!(saved.selected_files.contains("a/notes.md"));
    assert_eq!(saved.file_extension, ".md");

    // Switching back restores the earlier check.
    session.set_extension(".py");
    assert_eq!(session.tree().checked_files(), vec!["a/x.py"]);
}

#[test]
fn test_extension_switch_keeps_matching_checks() {
    let project = project();
    write(project.path(), "c/w.md", "w");
    let state_dir = tempdir().unwrap();

    let mut session = Session::open(config(&project, &state_dir));
    session.set_extension(".md");
    session.set_checked("c/w.md", true).unwrap();
    session.set_extension(".py");
    assert!(session.tree().checked_files().is_empty());
    session.set_extension(".md");
    assert_eq!(session.tree().checked_files(), vec!["c/w.md"]);
}

#[test]
fn test_select_all_is_reapplied_after_extension_switch() {
    let project = project();
    let state_dir = tempdir().unwrap();

    let mut session = Session::open(config(&project, &state_dir));
    session.toggle_select_all(true);
    assert!(session.select_all());
    assert_eq!(session.aggregate_state(), CheckState::Checked);

    session.set_extension(".md");
    assert_eq!(session.tree().checked_files(), vec!["a/notes.md"]);
    assert!(session.select_all());

    session.set_checked("a/notes.md", false).unwrap();
    assert!(!session.select_all());
}

#[test]
fn test_saved_select_all_selects_new_files() {
    let project = project();
    let state_dir = tempdir().unwrap();
    StateStore::new(state_path(&state_dir))
        .save(&SelectionState {
            select_all: true,
            ..SelectionState::default()
        })
        .unwrap();
    write(project.path(), "c/new.py", "new");

    let session = Session::open(config(&project, &state_dir));
    assert_eq!(session.aggregate_state(), CheckState::Checked);
    assert!(session.tree().checked_files().contains(&"c/new.py"));
}

#[test]
fn test_deleted_files_drop_out_of_selection() {
    let project = project();
    let state_dir = tempdir().unwrap();
    StateStore::new(state_path(&state_dir))
        .save(&SelectionState {
            selected_files: ["a/x.py", "a/removed.py"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..SelectionState::default()
        })
        .unwrap();

    let session = Session::open(config(&project, &state_dir));
    assert_eq!(session.tree().checked_files(), vec!["a/x.py"]);
    let persisted: Vec<String> = session.selection_to_persist().into_iter().collect();
    assert_eq!(persisted, vec!["a/x.py".to_string()]);
}

#[test]
fn test_unknown_path_is_an_error() {
    let project = project();
    let state_dir = tempdir().unwrap();
    let mut session = Session::open(config(&project, &state_dir));

    let result = session.set_checked("build/out.py", true);
    assert!(matches!(result, Err(SpoonError::NodeNotFound(_))));
}

#[tokio::test]
#[traced_test]
async fn test_clipboard_failure_is_not_fatal() {
    let project = project();
    let state_dir = tempdir().unwrap();
    let mut session = Session::open(config(&project, &state_dir));
    session.set_checked("b", true).unwrap();

    let exported = session.submit(&mut BrokenClipboard).await.unwrap();
    assert!(exported.is_some());
    assert!(logs_contain("Could not copy to clipboard"));
    assert!(state_path(&state_dir).exists());
}
