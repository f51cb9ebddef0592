//! Persistent expand/collapse mutations.
//!
//! Every function takes a borrowed forest and returns a new one. The input is
//! never modified. Nodes off the root-to-target spine are shared with the
//! input (`Arc::ptr_eq` holds for them), so a mutation costs O(depth * breadth)
//! rather than a full copy.

use std::sync::Arc;

use tracing::trace;

use super::entities::{Forest, TreeNode};

/// Set `expanded = true` on every node at every depth, leaves included.
pub fn expand_all(tree: &[Arc<TreeNode>]) -> Forest {
    set_all(tree, true)
}

/// Set `expanded = false` on every node at every depth.
pub fn collapse_all(tree: &[Arc<TreeNode>]) -> Forest {
    set_all(tree, false)
}

fn set_all(tree: &[Arc<TreeNode>], expanded: bool) -> Forest {
    tree.iter()
        .map(|node| {
            Arc::new(
                node.with_children(set_all(&node.children, expanded))
                    .with_expanded(expanded),
            )
        })
        .collect()
}

/// Set the `expanded` flag of the node addressed by `path`.
///
/// Descends by matching `path[0]` against the siblings in order. Only the
/// first sibling with a matching name is followed. A path that matches
/// nothing, including the empty path, leaves the tree content unchanged.
pub fn set_expanded<S: AsRef<str>>(tree: &[Arc<TreeNode>], path: &[S], expanded: bool) -> Forest {
    rewrite_at(tree, path, &|node: &TreeNode| node.with_flag(expanded))
}

/// Replace the children of the node addressed by `path`.
///
/// Same matching rules as [`set_expanded`]; the target keeps its own flag.
pub fn replace_children<S: AsRef<str>>(
    tree: &[Arc<TreeNode>],
    path: &[S],
    children: Forest,
) -> Forest {
    rewrite_at(tree, path, &|node: &TreeNode| {
        node.with_children(children.clone())
    })
}

fn rewrite_at<S, F>(tree: &[Arc<TreeNode>], path: &[S], rewrite: &F) -> Forest
where
    S: AsRef<str>,
    F: Fn(&TreeNode) -> TreeNode,
{
    let Some((head, rest)) = path.split_first() else {
        return tree.to_vec();
    };
    let head = head.as_ref();

    let mut matched = false;
    tree.iter()
        .map(|node| {
            if matched || node.name != head {
                return Arc::clone(node);
            }
            matched = true;
            if rest.is_empty() {
                trace!(name = head, "rewrite target");
                Arc::new(rewrite(node))
            } else {
                Arc::new(node.with_children(rewrite_at(&node.children, rest, rewrite)))
            }
        })
        .collect()
}
