//! Domain entities: core data structures

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Separator used in the textual form of a [`NodePath`].
pub const PATH_SEPARATOR: char = '/';

/// An ordered list of top-level nodes.
///
/// Nodes are shared through `Arc`, so unchanged subtrees of two tree
/// versions point at the same allocation.
pub type Forest = Vec<Arc<TreeNode>>;

/// Trailing status marker of a node (e.g. the state of a changed file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Added,
    Modified,
    Removed,
    Renamed,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeStatus::Added => "added",
            NodeStatus::Modified => "modified",
            NodeStatus::Removed => "removed",
            NodeStatus::Renamed => "renamed",
        };
        f.write_str(label)
    }
}

/// A named entry in the hierarchy.
///
/// Field order matters for TOML output: `children` is an array of tables
/// and must come after the plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Identifier, unique among siblings
    pub name: String,
    /// Whether the children are shown
    #[serde(default)]
    pub expanded: bool,
    /// Directory-like node that may have children not loaded yet
    #[serde(default, skip_serializing_if = "is_false")]
    pub directory: bool,
    /// Optional trailing status marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,
    /// Children in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Forest,
}

impl TreeNode {
    /// Collapsed node without children.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expanded: false,
            directory: false,
            status: None,
            children: Vec::new(),
        }
    }

    /// Collapsed node with the given children.
    pub fn branch(name: impl Into<String>, children: impl IntoIterator<Item = TreeNode>) -> Self {
        Self {
            name: name.into(),
            expanded: false,
            directory: false,
            status: None,
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn with_directory(mut self, directory: bool) -> Self {
        self.directory = directory;
        self
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Rendered as a directory: marked as one, or has children.
    pub fn is_directory(&self) -> bool {
        self.directory || !self.is_leaf()
    }

    /// Copy of this node with a different `expanded` flag; children are shared.
    pub(crate) fn with_flag(&self, expanded: bool) -> Self {
        Self {
            name: self.name.clone(),
            expanded,
            directory: self.directory,
            status: self.status,
            children: self.children.clone(),
        }
    }

    /// Copy of this node with new children; the flag is kept.
    pub(crate) fn with_children(&self, children: Forest) -> Self {
        Self {
            name: self.name.clone(),
            expanded: self.expanded,
            directory: self.directory,
            status: self.status,
            children,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Sequence of names addressing one node, walking down from the top level.
///
/// The textual form joins the names with `/`, e.g. `src/Button/Button.tsx`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse the textual form. Empty segments are dropped, so `""` and `"/"`
    /// both yield the empty path.
    pub fn parse(s: &str) -> Self {
        Self(
            s.split(PATH_SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Name of the addressed node.
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Path of the parent node, `None` for the empty path.
    pub fn parent(&self) -> Option<NodePath> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Path of a child of this node.
    pub fn child(&self, name: impl Into<String>) -> NodePath {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// Every proper ancestor, outermost first.
    pub fn ancestors(&self) -> Vec<NodePath> {
        (1..self.0.len()).map(|n| Self(self.0[..n].to_vec())).collect()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("/"))
    }
}

impl FromStr for NodePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<S: Into<String>> FromIterator<S> for NodePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl AsRef<[String]> for NodePath {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}
