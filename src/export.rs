use crate::config::{SpoonConfig, TitleMode};
use crate::tree::FileTree;
use crate::utils::{base_name, read_file_content};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Relative path the content was read from.
    pub path: String,
    pub content: String,
}

/// Title → file, in collection order. Re-inserting a title keeps its original
/// position and replaces the file.
#[derive(Debug, Clone, Default)]
pub struct ExportedFiles {
    entries: IndexMap<String, ExportedFile>,
}

impl ExportedFiles {
    pub fn insert(&mut self, title: String, file: ExportedFile) {
        if let Some(previous) = self.entries.insert(title.clone(), file) {
            debug!("Title {} collides, replacing {}", title, previous.path);
        }
    }

    pub fn get(&self, title: &str) -> Option<&ExportedFile> {
        self.entries.get(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExportedFile)> {
        self.entries.iter().map(|(title, file)| (title.as_str(), file))
    }

    /// `# {title}\n{content}` blocks separated by a blank line.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(title, file)| format!("# {}\n{}", title, file.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
pub trait Exporter {
    async fn export(&self, tree: &FileTree) -> ExportedFiles;
}

pub struct BasicExporter {
    root: PathBuf,
    title_mode: TitleMode,
    trim_content: bool,
}

impl BasicExporter {
    pub fn new(root: PathBuf, title_mode: TitleMode, trim_content: bool) -> Self {
        BasicExporter {
            root,
            title_mode,
            trim_content,
        }
    }

    pub fn from_config(config: &SpoonConfig) -> Self {
        BasicExporter::new(config.root.clone(), config.title_mode, config.trim_content)
    }

    fn title_for(&self, path: &str) -> String {
        match self.title_mode {
            TitleMode::BaseName => base_name(path).to_owned(),
            TitleMode::RelativePath => path.to_owned(),
        }
    }
}

#[async_trait]
impl Exporter for BasicExporter {
    /// Reads every checked leaf in display order. Unreadable files are logged
    /// and left out.
    async fn export(&self, tree: &FileTree) -> ExportedFiles {
        let mut exported = ExportedFiles::default();
        for path in tree.checked_files() {
            debug!("Processing file: {}", path);
            match read_file_content(self.root.join(path)).await {
                Ok(content) => {
                    let content = if self.trim_content {
                        content.trim().to_owned()
                    } else {
                        content
                    };
                    trace!("Read {} bytes from {}", content.len(), path);
                    exported.insert(
                        self.title_for(path),
                        ExportedFile {
                            path: path.to_owned(),
                            content,
                        },
                    );
                }
                Err(e) => {
                    warn!("Failed to read file {}: {}", path, e);
                }
            }
        }
        exported
    }
}
