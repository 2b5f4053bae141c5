use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_EXTENSION: &str = ".py";
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";
pub const STATE_FILE_NAME: &str = "last_selection.json";

/// How exported files are titled in the clipboard text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleMode {
    /// File name only. Files sharing a name collapse into one entry.
    #[default]
    BaseName,
    /// Path relative to the project root.
    RelativePath,
}

#[derive(Debug, Clone)]
pub struct SpoonConfig {
    pub root: PathBuf,
    /// Relative to `root`.
    pub ignore_file: PathBuf,
    pub extra_ignore_patterns: Vec<String>,
    pub state_path: PathBuf,
    pub title_mode: TitleMode,
    pub trim_content: bool,
}

impl Default for SpoonConfig {
    fn default() -> Self {
        SpoonConfig {
            root: PathBuf::from("."),
            ignore_file: PathBuf::from(DEFAULT_IGNORE_FILE),
            extra_ignore_patterns: Vec::new(),
            state_path: default_state_path(),
            title_mode: TitleMode::BaseName,
            trim_content: true,
        }
    }
}

/// Per-user cache location for the selection state, or the temp dir when the
/// platform has no cache directory.
pub fn default_state_path() -> PathBuf {
    let dir = match ProjectDirs::from("", "", "spoon") {
        Some(dirs) => dirs.cache_dir().to_path_buf(),
        None => {
            debug!("No project cache directory available, using temp dir");
            std::env::temp_dir().join("spoon")
        }
    };
    dir.join(STATE_FILE_NAME)
}

/// Accepts `py` or `.py` and returns the dotted form.
pub fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim();
    if extension.is_empty() || extension.starts_with('.') {
        extension.to_owned()
    } else {
        format!(".{}", extension)
    }
}
