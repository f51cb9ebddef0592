//! TOML tree files
//!
//! ```toml
//! [[nodes]]
//! name = "src"
//! expanded = true
//!
//! [[nodes.children]]
//! name = "Avatar.tsx"
//! status = "added"
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Forest, TreeBuilder, TreeNode};
use crate::infrastructure::traits::FileSystem;

/// On-disk representation: the top-level nodes under `nodes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TreeDocument {
    #[serde(default)]
    nodes: Forest,
}

/// Reads and writes tree files.
pub struct TreeFileService {
    fs: Arc<dyn FileSystem>,
}

impl TreeFileService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and validate a tree file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Forest> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::SourceNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree file", path)?;
        let tree = Self::parse(&content, path)?;
        debug!("loaded {} top-level nodes from {}", tree.len(), path.display());
        Ok(tree)
    }

    /// Parse TOML content; `origin` is used in error messages only.
    pub fn parse(content: &str, origin: &Path) -> ApplicationResult<Forest> {
        let document: TreeDocument =
            toml::from_str(content).map_err(|e| ApplicationError::Parse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        TreeBuilder::validate(&document.nodes)?;
        Ok(document.nodes)
    }

    /// Serialize a tree to TOML.
    pub fn to_toml(tree: &[Arc<TreeNode>]) -> ApplicationResult<String> {
        let document = TreeDocument {
            nodes: tree.to_vec(),
        };
        toml::to_string_pretty(&document).map_err(|e| ApplicationError::Serialize {
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path, tree: &[Arc<TreeNode>]) -> ApplicationResult<()> {
        let content = Self::to_toml(tree)?;
        self.fs
            .write(path, &content)
            .with_path_context("write tree file", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, NodeStatus};

    #[test]
    fn given_nested_document_when_parse_then_defaults_apply() {
        let content = r#"
[[nodes]]
name = "src"
expanded = true

[[nodes.children]]
name = "Avatar.tsx"
status = "added"

[[nodes]]
name = "package.json"
"#;
        let tree = TreeFileService::parse(content, Path::new("files.toml")).unwrap();

        assert_eq!(tree.len(), 2);
        assert!(tree[0].expanded);
        assert_eq!(tree[0].children[0].status, Some(NodeStatus::Added));
        assert!(!tree[0].children[0].expanded);
        assert!(tree[1].is_leaf());
    }

    #[test]
    fn given_duplicate_siblings_when_parse_then_domain_error() {
        let content = r#"
[[nodes]]
name = "a"

[[nodes]]
name = "a"
"#;
        let err = TreeFileService::parse(content, Path::new("dup.toml")).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::DuplicateName { .. })
        ));
    }

    #[test]
    fn given_invalid_toml_when_parse_then_parse_error_names_file() {
        let err = TreeFileService::parse("[[nodes]\n", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn given_tree_when_to_toml_then_parses_back_to_same_tree() {
        let tree = vec![Arc::new(
            TreeNode::branch(
                "src",
                [TreeNode::leaf("a.ts").with_status(NodeStatus::Modified)],
            )
            .with_expanded(true),
        )];
        let content = TreeFileService::to_toml(&tree).unwrap();
        assert!(content.contains("status = \"modified\""));
        assert_eq!(
            TreeFileService::parse(&content, Path::new("out.toml")).unwrap(),
            tree
        );
    }
}
