//! Tree construction and invariant checks.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::entities::{Forest, TreeNode, PATH_SEPARATOR};
use super::error::{DomainError, DomainResult};

/// Label used for the top level in error messages.
const TOP_LEVEL: &str = "<root>";

/// Builds seeded demo hierarchies and validates externally supplied trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBuilder {
    breadth: usize,
    depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// 5 nodes per level, 3 levels: 125 leaves named `Item i.j.k`.
    pub fn new() -> Self {
        Self {
            breadth: 5,
            depth: 3,
        }
    }

    pub fn with_breadth(mut self, breadth: usize) -> Self {
        self.breadth = breadth;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Generate a fully collapsed tree named `Item 0`, `Item 0.0`, `Item 0.0.0`, ...
    #[instrument(level = "debug")]
    pub fn generate(&self) -> Forest {
        let tree = self.generate_level(None, self.depth);
        debug!("generated {} top-level nodes", tree.len());
        tree
    }

    fn generate_level(&self, prefix: Option<&str>, remaining: usize) -> Forest {
        if remaining == 0 {
            return Vec::new();
        }
        (0..self.breadth)
            .map(|i| {
                let name = match prefix {
                    Some(p) => format!("{p}.{i}"),
                    None => format!("Item {i}"),
                };
                let children = self.generate_level(Some(&name), remaining - 1);
                Arc::new(TreeNode {
                    name,
                    expanded: false,
                    directory: false,
                    status: None,
                    children,
                })
            })
            .collect()
    }

    /// Check that names are non-empty, contain no path separator, and are
    /// unique among siblings at every depth.
    #[instrument(level = "debug", skip(tree))]
    pub fn validate(tree: &[Arc<TreeNode>]) -> DomainResult<()> {
        Self::validate_level(tree, TOP_LEVEL)
    }

    fn validate_level(siblings: &[Arc<TreeNode>], parent: &str) -> DomainResult<()> {
        let mut seen = HashSet::new();
        for node in siblings {
            if node.name.is_empty() {
                return Err(DomainError::EmptyName {
                    parent: parent.to_string(),
                });
            }
            if node.name.contains(PATH_SEPARATOR) {
                return Err(DomainError::InvalidName {
                    name: node.name.clone(),
                });
            }
            if !seen.insert(node.name.as_str()) {
                return Err(DomainError::DuplicateName {
                    parent: parent.to_string(),
                    name: node.name.clone(),
                });
            }
            Self::validate_level(&node.children, &node.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query;

    #[test]
    fn given_default_builder_when_generate_then_matches_seeded_demo_tree() {
        let tree = TreeBuilder::new().generate();
        assert_eq!(tree.len(), 5);
        assert_eq!(query::count(&tree), 5 + 25 + 125);
        assert_eq!(query::depth(&tree), 3);
        assert_eq!(tree[1].children[2].children[4].name, "Item 1.2.4");
        assert!(TreeBuilder::validate(&tree).is_ok());
    }

    #[test]
    fn given_zero_depth_when_generate_then_empty() {
        assert!(TreeBuilder::new().with_depth(0).generate().is_empty());
    }

    #[test]
    fn given_duplicate_sibling_when_validate_then_reports_parent() {
        let tree = vec![Arc::new(TreeNode::branch(
            "src",
            [TreeNode::leaf("a.ts"), TreeNode::leaf("a.ts")],
        ))];
        assert_eq!(
            TreeBuilder::validate(&tree),
            Err(DomainError::DuplicateName {
                parent: "src".into(),
                name: "a.ts".into()
            })
        );
    }

    #[test]
    fn given_same_name_in_different_parents_when_validate_then_ok() {
        let tree = vec![
            Arc::new(TreeNode::branch("a", [TreeNode::leaf("index.ts")])),
            Arc::new(TreeNode::branch("b", [TreeNode::leaf("index.ts")])),
        ];
        assert!(TreeBuilder::validate(&tree).is_ok());
    }

    #[test]
    fn given_bad_names_when_validate_then_errors() {
        let empty = vec![Arc::new(TreeNode::leaf(""))];
        assert!(matches!(
            TreeBuilder::validate(&empty),
            Err(DomainError::EmptyName { .. })
        ));
        let slashed = vec![Arc::new(TreeNode::leaf("a/b"))];
        assert!(matches!(
            TreeBuilder::validate(&slashed),
            Err(DomainError::InvalidName { .. })
        ));
    }
}
