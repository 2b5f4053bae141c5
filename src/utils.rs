use crate::SpoonError;
use std::path::Path;
use tokio::fs as async_fs;

/// Relative path with `/` separators and no leading `./`.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let path = path.strip_prefix("./").unwrap_or(path);
    path.to_string_lossy().replace('\\', "/")
}

/// Final segment of a `/`-separated relative path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Suffix test on the file name, so `.py` and `.gen.py` both work. An empty
/// extension matches names without one.
pub fn has_extension(path: &str, extension: &str) -> bool {
    let name = base_name(path);
    // A leading dot marks a hidden file, not an extension.
    let name = name.strip_prefix('.').unwrap_or(name);
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() {
        return !name.contains('.');
    }
    name.strip_suffix(ext)
        .and_then(|rest| rest.strip_suffix('.'))
        .is_some_and(|stem| !stem.is_empty())
}

pub async fn read_file_content<P: AsRef<Path>>(file_path: P) -> Result<String, SpoonError> {
    async_fs::read_to_string(file_path.as_ref())
        .await
        .map_err(|err| SpoonError::FileReadError(err.to_string()))
}
