//! Read-only queries over a forest.

use std::sync::Arc;

use super::entities::{NodePath, TreeNode};

/// One row of the flattened, visible tree.
#[derive(Debug, Clone)]
pub struct VisibleRow {
    /// Nesting level, 0 for top-level nodes
    pub depth: usize,
    pub path: NodePath,
    pub node: Arc<TreeNode>,
}

/// Look up the node addressed by `path`, following the first match per level.
pub fn find<'a, S: AsRef<str>>(tree: &'a [Arc<TreeNode>], path: &[S]) -> Option<&'a Arc<TreeNode>> {
    let (head, rest) = path.split_first()?;
    let node = tree.iter().find(|node| node.name == head.as_ref())?;
    if rest.is_empty() {
        Some(node)
    } else {
        find(&node.children, rest)
    }
}

/// Total number of nodes at every depth.
pub fn count(tree: &[Arc<TreeNode>]) -> usize {
    tree.iter().map(|node| 1 + count(&node.children)).sum()
}

/// Number of levels; 0 for an empty forest.
pub fn depth(tree: &[Arc<TreeNode>]) -> usize {
    tree.iter()
        .map(|node| 1 + depth(&node.children))
        .max()
        .unwrap_or(0)
}

/// Pre-order rows of every node whose ancestors are all expanded.
pub fn visible_rows(tree: &[Arc<TreeNode>]) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    // Push in reverse so siblings pop left to right
    let mut stack: Vec<(usize, NodePath, &Arc<TreeNode>)> = tree
        .iter()
        .rev()
        .map(|node| (0, NodePath::new().child(node.name.clone()), node))
        .collect();

    while let Some((level, path, node)) = stack.pop() {
        if node.expanded {
            for child in node.children.iter().rev() {
                stack.push((level + 1, path.child(child.name.clone()), child));
            }
        }
        rows.push(VisibleRow {
            depth: level,
            path,
            node: Arc::clone(node),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Forest;

    fn files() -> Forest {
        vec![
            Arc::new(
                TreeNode::branch(
                    "src",
                    [
                        TreeNode::leaf("Avatar.tsx"),
                        TreeNode::branch("Button", [TreeNode::leaf("Button.tsx")]),
                    ],
                )
                .with_expanded(true),
            ),
            Arc::new(TreeNode::leaf("package.json")),
        ]
    }

    #[test]
    fn given_nested_path_when_find_then_returns_node() {
        let tree = files();
        let node = find(&tree, &["src", "Button", "Button.tsx"]).expect("node exists");
        assert_eq!(node.name, "Button.tsx");
        assert!(find(&tree, &["src", "nope"]).is_none());
        let empty: [&str; 0] = [];
        assert!(find(&tree, &empty).is_none());
    }

    #[test]
    fn given_files_when_count_and_depth_then_reports_shape() {
        assert_eq!(count(&files()), 5);
        assert_eq!(depth(&files()), 3);
        assert_eq!(depth(&[]), 0);
    }

    #[test]
    fn given_collapsed_button_when_visible_rows_then_hides_its_children() {
        let rows: Vec<String> = visible_rows(&files())
            .iter()
            .map(|row| format!("{}:{}", row.depth, row.path))
            .collect();
        assert_eq!(
            rows,
            vec!["0:src", "1:src/Avatar.tsx", "1:src/Button", "0:package.json"]
        );
    }
}
