use crate::errors::SpoonError;
use crate::tree::{CheckState, FileTree, NodeId};
use tracing::{debug, trace};

impl FileTree {
    /// Checks or unchecks `id`. For a directory every leaf beneath it follows
    /// and nested directories are recomputed; ancestors are then recomputed up
    /// to the top level.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        trace!("Setting {:?} checked={}", self.node(id).path, checked);
        let below = self.descendants(id);

        for &node in &below {
            if !self.node(node).is_dir() {
                self.set_state(node, CheckState::from_bool(checked));
            }
        }
        // Pre-order reversed visits children before their parents.
        for &node in below.iter().rev() {
            if self.node(node).is_dir() {
                self.recompute(node);
            }
        }

        self.propagate_up(id);
    }

    /// Looks up `path` and checks or unchecks it.
    pub fn set_checked_path(&mut self, path: &str, checked: bool) -> Result<(), SpoonError> {
        let id = self
            .find(path)
            .ok_or_else(|| SpoonError::NodeNotFound(path.to_owned()))?;
        self.set_checked(id, checked);
        Ok(())
    }

    pub fn toggle_select_all(&mut self, checked: bool) {
        debug!("Setting all nodes checked={}", checked);
        let roots = self.roots().to_vec();
        for id in roots {
            self.set_checked(id, checked);
        }
    }

    /// State of the "select all" control. An empty tree is Unchecked.
    pub fn aggregate_state(&self) -> CheckState {
        CheckState::aggregate(self.roots().iter().map(|&id| self.state(id)))
    }

    fn propagate_up(&mut self, id: NodeId) {
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            self.recompute(parent);
            current = self.node(parent).parent;
        }
    }
}

