use crate::config::normalize_extension;
use crate::utils::has_extension;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Checked,
    PartiallyChecked,
}

impl CheckState {
    pub fn from_bool(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }

    /// Combined state of a set of sibling states. An empty set is Unchecked:
    /// a directory with nothing in it never shows as checked.
    pub fn aggregate<I: IntoIterator<Item = CheckState>>(states: I) -> CheckState {
        let mut any = false;
        let mut all_checked = true;
        let mut all_unchecked = true;
        for state in states {
            any = true;
            all_checked &= state == CheckState::Checked;
            all_unchecked &= state == CheckState::Unchecked;
        }
        if !any || all_unchecked {
            CheckState::Unchecked
        } else if all_checked {
            CheckState::Checked
        } else {
            CheckState::PartiallyChecked
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Relative path with `/` separators.
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub state: CheckState,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Files grouped by directory. Nodes live in an arena; a parent always has a
/// lower index than its children.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    index: HashMap<String, NodeId>,
}

impl FileTree {
    /// Builds the tree for `paths` in order. Leaves whose path is in
    /// `previously_selected` start Checked; directory states are derived.
    pub fn build<S: AsRef<str>>(paths: &[S], previously_selected: &HashSet<String>) -> Self {
        let mut tree = FileTree::default();
        for path in paths {
            tree.insert(path.as_ref(), previously_selected);
        }
        tree.recompute_all();
        debug!(
            "Built tree with {} nodes ({} top level)",
            tree.nodes.len(),
            tree.roots.len()
        );
        tree
    }

    /// Like [`FileTree::build`] but keeps only `paths` with `extension`.
    pub fn build_for_extension<S: AsRef<str>>(
        paths: &[S],
        extension: &str,
        previously_selected: &HashSet<String>,
    ) -> Self {
        let extension = normalize_extension(extension);
        let matching: Vec<&str> = paths
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| has_extension(p, &extension))
            .collect();
        FileTree::build(&matching, previously_selected)
    }

    fn insert(&mut self, path: &str, previously_selected: &HashSet<String>) {
        if self.index.contains_key(path) {
            trace!("Skipping duplicate path {}", path);
            return;
        }
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, dirs)) = segments.split_last() else {
            return;
        };

        let mut parent = None;
        let mut cumulative = String::new();
        for dir in dirs {
            if !cumulative.is_empty() {
                cumulative.push('/');
            }
            cumulative.push_str(dir);
            parent = Some(match self.index.get(&cumulative) {
                Some(&id) => id,
                None => self.push_node(&cumulative, dir, EntryKind::Directory, parent),
            });
        }

        let id = self.push_node(path, file_name, EntryKind::File, parent);
        if previously_selected.contains(path) {
            self.nodes[id.0].state = CheckState::Checked;
        }
    }

    fn push_node(
        &mut self,
        path: &str,
        name: &str,
        kind: EntryKind,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            path: path.to_owned(),
            name: name.to_owned(),
            kind,
            state: CheckState::Unchecked,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        self.index.insert(path.to_owned(), id);
        id
    }

    /// Recomputes every directory, children before parents.
    fn recompute_all(&mut self) {
        for i in (0..self.nodes.len()).rev() {
            if self.nodes[i].is_dir() {
                self.recompute(NodeId(i));
            }
        }
    }

    /// Derives a directory's state from its children.
    pub(crate) fn recompute(&mut self, id: NodeId) {
        let state = CheckState::aggregate(
            self.nodes[id.0]
                .children
                .iter()
                .map(|child| self.nodes[child.0].state),
        );
        self.nodes[id.0].state = state;
    }

    pub(crate) fn set_state(&mut self, id: NodeId, state: CheckState) {
        self.nodes[id.0].state = state;
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn state(&self, id: NodeId) -> CheckState {
        self.nodes[id.0].state
    }

    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.index.get(path.trim_matches('/')).copied()
    }

    /// Top-level nodes, children of the synthetic root.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids in display order: pre-order, children in insertion order.
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// `id` and everything beneath it, pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        order
    }

    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        depth
    }

    pub fn leaf_paths(&self) -> Vec<&str> {
        self.traverse()
            .into_iter()
            .map(|id| &self.nodes[id.0])
            .filter(|node| !node.is_dir())
            .map(|node| node.path.as_str())
            .collect()
    }

    /// Paths of checked leaves in display order.
    pub fn checked_files(&self) -> Vec<&str> {
        self.traverse()
            .into_iter()
            .map(|id| &self.nodes[id.0])
            .filter(|node| !node.is_dir() && node.state == CheckState::Checked)
            .map(|node| node.path.as_str())
            .collect()
    }
}
