//! Terminal rendering of the visible rows.

use std::collections::HashSet;
use std::sync::Arc;

use termtree::Tree;

use crate::application::services::TreeSession;
use crate::domain::{NodePath, TreeNode};

/// What to include in the rendered tree.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render collapsed subtrees too
    pub show_all: bool,
    /// Append trailing status markers
    pub show_status: bool,
    /// Node to mark as selected
    pub current: Option<NodePath>,
    /// Directories whose children have not been loaded; no count is shown
    pub unloaded: HashSet<NodePath>,
}

/// Render the visible rows of `tree` under a root `label`.
pub fn render_tree(tree: &[Arc<TreeNode>], label: &str, options: &RenderOptions) -> Tree<String> {
    Tree::new(label.to_string()).with_leaves(render_level(tree, &NodePath::new(), options))
}

/// Conversion into a printable `termtree::Tree`.
pub trait TreeRender {
    fn to_term_tree(&self, label: &str, options: &RenderOptions) -> Tree<String>;
}

impl TreeRender for [Arc<TreeNode>] {
    fn to_term_tree(&self, label: &str, options: &RenderOptions) -> Tree<String> {
        render_tree(self, label, options)
    }
}

impl TreeRender for TreeSession {
    /// Uses the session selection unless `options.current` is set.
    fn to_term_tree(&self, label: &str, options: &RenderOptions) -> Tree<String> {
        let options = RenderOptions {
            current: options
                .current
                .clone()
                .or_else(|| self.current_path().cloned()),
            ..options.clone()
        };
        self.tree().to_term_tree(label, &options)
    }
}

fn render_level(
    siblings: &[Arc<TreeNode>],
    parent: &NodePath,
    options: &RenderOptions,
) -> Vec<Tree<String>> {
    siblings
        .iter()
        .map(|node| {
            let path = parent.child(node.name.clone());
            let tree = Tree::new(node_label(node, &path, options));
            if node.expanded || options.show_all {
                tree.with_leaves(render_level(&node.children, &path, options))
            } else {
                tree
            }
        })
        .collect()
}

/// Row label: `> ` selection marker, `/` for directories, `(+N)` hidden
/// children of a collapsed directory whose count is known, trailing `[status]`.
pub fn node_label(node: &TreeNode, path: &NodePath, options: &RenderOptions) -> String {
    let mut label = String::new();
    if options.current.as_ref() == Some(path) {
        label.push_str("> ");
    }
    label.push_str(&node.name);
    if node.is_directory() {
        label.push('/');
        if !node.expanded && !options.show_all && !options.unloaded.contains(path) {
            label.push_str(&format!(" (+{})", node.children.len()));
        }
    }
    if options.show_status {
        if let Some(status) = node.status {
            label.push_str(&format!(" [{status}]"));
        }
    }
    label
}
