use crate::config::{normalize_extension, SpoonConfig};
use crate::ignore::IgnorePatterns;
use crate::utils::{has_extension, normalize_path};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Lists project files of one extension, honouring the ignore file.
pub struct FileDiscoverer {
    root: PathBuf,
    ignore: IgnorePatterns,
}

impl FileDiscoverer {
    pub fn new(root: PathBuf, ignore: IgnorePatterns) -> Self {
        FileDiscoverer { root, ignore }
    }

    /// Reads the ignore file named by `config` once, up front.
    pub fn from_config(config: &SpoonConfig) -> Self {
        let ignore = IgnorePatterns::load(
            &config.root,
            &config.ignore_file,
            &config.extra_ignore_patterns,
        );
        FileDiscoverer::new(config.root.clone(), ignore)
    }

    /// Relative, `/`-separated paths of every file (or link to one) under the root with
    /// `extension`. Ignored directories are pruned, not descended into.
    /// Directories come before files at each level, both sorted by name.
    pub fn discover(&self, extension: &str) -> Vec<String> {
        let extension = normalize_extension(extension);
        debug!("Discovering {} files under {:?}", extension, self.root);

        let walker = WalkDir::new(&self.root)
            .sort_by(|a, b| {
                b.file_type()
                    .is_dir()
                    .cmp(&a.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !is_file_entry(&entry) {
                continue;
            }
            let Some(rel_path) = self.relative(entry.path()) else {
                continue;
            };
            if has_extension(&rel_path, &extension) {
                trace!("Discovered {}", rel_path);
                files.push(rel_path);
            }
        }

        debug!("Discovered {} files", files.len());
        files
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        match self.relative(entry.path()) {
            Some(rel_path) => {
                let ignored = self
                    .ignore
                    .should_ignore(&rel_path, entry.file_type().is_dir());
                if ignored {
                    trace!("Ignoring {}", rel_path);
                }
                ignored
            }
            None => true,
        }
    }

    fn relative(&self, path: &Path) -> Option<String> {
        path.strip_prefix(&self.root).ok().map(normalize_path)
    }
}

/// Regular files, plus symlinks that resolve to one. Linked directories are
/// never followed.
fn is_file_entry(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
