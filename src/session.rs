use crate::clipboard::ClipboardSink;
use crate::config::{normalize_extension, SpoonConfig};
use crate::discover::FileDiscoverer;
use crate::errors::SpoonError;
use crate::export::{BasicExporter, ExportedFiles, Exporter};
use crate::state::{SelectionState, StateStore};
use crate::tree::{CheckState, FileTree};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

/// One run of the selector: the remembered selection, the current extension
/// filter and the tree built from it.
pub struct Session {
    config: SpoonConfig,
    discoverer: FileDiscoverer,
    store: StateStore,
    /// Selected paths as of the last rebuild, including files outside the
    /// current tree.
    selection: BTreeSet<String>,
    extension: String,
    /// Set by selecting everything, cleared by unchecking anything.
    select_all: bool,
    tree: FileTree,
}

impl Session {
    /// Loads the saved selection and builds the tree for its extension.
    pub fn open(config: SpoonConfig) -> Self {
        let store = StateStore::new(config.state_path.clone());
        let saved = store.load();
        let discoverer = FileDiscoverer::from_config(&config);
        let mut session = Session {
            config,
            discoverer,
            store,
            selection: saved.selected_files,
            extension: normalize_extension(&saved.file_extension),
            select_all: saved.select_all,
            tree: FileTree::default(),
        };
        session.rebuild();
        session
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn select_all(&self) -> bool {
        self.select_all
    }

    /// Rediscovers with a new extension. Checked files that still match stay
    /// checked; select-all is re-applied when it is on.
    pub fn set_extension(&mut self, extension: &str) {
        let extension = normalize_extension(extension);
        if extension == self.extension {
            return;
        }
        info!("Switching extension filter to {}", extension);
        self.selection = self.merged_selection();
        self.extension = extension;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let paths = self.discoverer.discover(&self.extension);
        let selected: HashSet<String> = self.selection.iter().cloned().collect();
        self.tree = FileTree::build_for_extension(&paths, &self.extension, &selected);
        if self.select_all {
            self.tree.toggle_select_all(true);
        }
    }

    pub fn set_checked(&mut self, path: &str, checked: bool) -> Result<(), SpoonError> {
        self.tree.set_checked_path(path, checked)?;
        if !checked {
            self.select_all = false;
        }
        Ok(())
    }

    pub fn toggle_select_all(&mut self, checked: bool) {
        self.tree.toggle_select_all(checked);
        self.select_all = checked;
    }

    pub fn aggregate_state(&self) -> CheckState {
        self.tree.aggregate_state()
    }

    /// The remembered selection with the current tree's check states applied.
    fn merged_selection(&self) -> BTreeSet<String> {
        let mut selection = self.selection.clone();
        for id in self.tree.traverse() {
            let node = self.tree.node(id);
            if node.is_dir() {
                continue;
            }
            if node.state == CheckState::Checked {
                selection.insert(node.path.clone());
            } else {
                selection.remove(&node.path);
            }
        }
        selection
    }

    /// Checked files plus earlier selections outside the current tree that
    /// still exist on disk.
    pub fn selection_to_persist(&self) -> BTreeSet<String> {
        self.merged_selection()
            .into_iter()
            .filter(|path| {
                self.tree.find(path).is_some() || self.config.root.join(path).is_file()
            })
            .collect()
    }

    /// Exports the checked files to `sink` and saves the selection. Does
    /// nothing when no file is checked. Clipboard failures are only logged.
    pub async fn submit<C: ClipboardSink>(
        &mut self,
        sink: &mut C,
    ) -> Result<Option<ExportedFiles>, SpoonError> {
        if self.tree.checked_files().is_empty() {
            info!("No files selected, nothing to copy");
            return Ok(None);
        }

        let exporter = BasicExporter::from_config(&self.config);
        let exported = exporter.export(&self.tree).await;
        debug!("Exported {} entries", exported.len());

        match sink.set_text(exported.render()) {
            Ok(()) => info!("Files copied to clipboard successfully."),
            Err(e) => warn!("Could not copy to clipboard: {}", e),
        }

        let state = SelectionState {
            selected_files: self.selection_to_persist(),
            select_all: self.select_all,
            file_extension: self.extension.clone(),
        };
        self.store.save(&state)?;
        self.selection = state.selected_files;
        Ok(Some(exported))
    }
}
