use crate::config::DEFAULT_EXTENSION;
use crate::errors::SpoonError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What is remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default)]
    pub selected_files: BTreeSet<String>,
    #[serde(default)]
    pub select_all: bool,
    #[serde(default = "default_extension")]
    pub file_extension: String,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_owned()
}

impl Default for SelectionState {
    fn default() -> Self {
        SelectionState {
            selected_files: BTreeSet::new(),
            select_all: false,
            file_extension: default_extension(),
        }
    }
}

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        StateStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable state falls back to defaults.
    pub fn load(&self) -> SelectionState {
        match self.try_load() {
            Ok(Some(state)) => {
                debug!(
                    "Loaded {} selected files from {:?}",
                    state.selected_files.len(),
                    self.path
                );
                state
            }
            Ok(None) => {
                debug!("No saved selection at {:?}, using defaults", self.path);
                SelectionState::default()
            }
            Err(e) => {
                warn!("Ignoring saved selection {:?}: {}", self.path, e);
                SelectionState::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<SelectionState>, SpoonError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Replaces the stored state wholesale.
    pub fn save(&self, state: &SelectionState) -> Result<(), SpoonError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        info!(
            "Saved selection of {} files to {:?}",
            state.selected_files.len(),
            self.path
        );
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SpoonError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Removed saved selection {:?}", self.path);
        }
        Ok(())
    }
}
