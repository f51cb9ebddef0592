//! Navigation session
//!
//! Holds the current tree version and the selected path. Each mutation
//! replaces the tree with a new version computed from the current one, so
//! updates are applied one at a time in call order.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{self, query, Forest, NodePath, TreeNode, VisibleRow};

/// Current tree plus current selection.
#[derive(Debug, Clone, Default)]
pub struct TreeSession {
    tree: Forest,
    current: Option<NodePath>,
}

impl TreeSession {
    pub fn new(tree: Forest) -> Self {
        Self {
            tree,
            current: None,
        }
    }

    pub fn tree(&self) -> &[Arc<TreeNode>] {
        &self.tree
    }

    /// The selected path, if any.
    pub fn current_path(&self) -> Option<&NodePath> {
        self.current.as_ref()
    }

    pub fn find(&self, path: &NodePath) -> Option<&Arc<TreeNode>> {
        query::find(&self.tree, path.segments())
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        query::visible_rows(&self.tree)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn expand_all(&mut self) {
        self.tree = domain::expand_all(&self.tree);
    }

    #[instrument(level = "debug", skip(self))]
    pub fn collapse_all(&mut self) {
        self.tree = domain::collapse_all(&self.tree);
    }

    /// Set the flag of one node. Unknown paths leave the tree unchanged.
    pub fn set_expanded(&mut self, path: &NodePath, expanded: bool) {
        debug!("set_expanded: path={}, expanded={}", path, expanded);
        self.tree = domain::set_expanded(&self.tree, path.segments(), expanded);
    }

    /// Flip the flag of one node and return the new value.
    ///
    /// Returns `None` and changes nothing when the path does not exist.
    pub fn toggle(&mut self, path: &NodePath) -> Option<bool> {
        let expanded = !self.find(path)?.expanded;
        self.set_expanded(path, expanded);
        Some(expanded)
    }

    /// Select a node. Unknown paths keep the previous selection.
    pub fn select(&mut self, path: &NodePath) -> bool {
        if self.find(path).is_none() {
            debug!("select: unknown path {}", path);
            return false;
        }
        debug!("select: {}", path);
        self.current = Some(path.clone());
        true
    }

    /// Whether `path` is the selected node (compared by textual form).
    pub fn is_current(&self, path: &NodePath) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| current.to_string() == path.to_string())
    }

    /// Expand every ancestor of `path` so that the node becomes visible.
    pub fn reveal(&mut self, path: &NodePath) {
        for ancestor in path.ancestors() {
            self.set_expanded(&ancestor, true);
        }
    }

    /// Graft loaded children under `path`.
    pub fn replace_children(&mut self, path: &NodePath, children: Forest) {
        debug!("replace_children: path={}, count={}", path, children.len());
        if path.is_empty() {
            self.tree = children;
        } else {
            self.tree = domain::replace_children(&self.tree, path.segments(), children);
        }
    }
}
