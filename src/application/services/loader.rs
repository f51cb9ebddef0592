//! Lazy sub-tree loading
//!
//! Children of an expandable node are fetched the first time the node is
//! expanded. Each expandable node moves through
//! `Initial -> Loading -> Done | Error`; an error is cleared by `retry`
//! (which loads again) or `dismiss` (which does not).

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::services::TreeSession;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{NodePath, TreeNode};
use crate::infrastructure::traits::FileSystem;

/// Load state of one expandable node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubTreeState {
    /// Never expanded
    #[default]
    Initial,
    Loading,
    Done,
    /// Last load failed with this message
    Error(String),
}

/// A child returned by a [`ChildSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedChild {
    pub node: TreeNode,
    /// Whether the child can itself be expanded and loaded
    pub expandable: bool,
}

/// Supplies the children of a node on demand.
pub trait ChildSource {
    /// Load the direct children of `path`; the empty path means the top level.
    fn load_children(&self, path: &NodePath) -> ApplicationResult<Vec<LoadedChild>>;
}

/// Lists one directory level at a time.
pub struct DirectorySource {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    show_hidden: bool,
}

impl DirectorySource {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
            show_hidden: false,
        }
    }

    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir_for(&self, path: &NodePath) -> PathBuf {
        path.segments()
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }
}

impl ChildSource for DirectorySource {
    fn load_children(&self, path: &NodePath) -> ApplicationResult<Vec<LoadedChild>> {
        let dir = self.dir_for(path);
        let mut entries = self
            .fs
            .list_dir(&dir)
            .map_err(|e| ApplicationError::Load {
                path: dir.clone(),
                message: format!("list directory: {e}"),
            })?;

        entries.retain(|entry| self.show_hidden || !entry.name.starts_with('.'));
        // Directories first, then by name
        entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });

        Ok(entries
            .into_iter()
            .map(|entry| LoadedChild {
                node: TreeNode::leaf(entry.name).with_directory(entry.is_dir),
                expandable: entry.is_dir,
            })
            .collect())
    }
}

/// Tracks per-node load state and grafts loaded children into a session.
pub struct SubTreeLoader<S> {
    source: S,
    states: HashMap<NodePath, SubTreeState>,
    expandable: HashSet<NodePath>,
}

impl<S: ChildSource> SubTreeLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            states: HashMap::new(),
            expandable: HashSet::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the top level and start a session on it.
    #[instrument(level = "debug", skip(self))]
    pub fn load_root(&mut self) -> ApplicationResult<TreeSession> {
        let root = NodePath::new();
        let children = self.source.load_children(&root)?;
        let mut session = TreeSession::new(Vec::new());
        self.graft(&mut session, &root, children);
        self.states.insert(root, SubTreeState::Done);
        Ok(session)
    }

    /// Current state of `path`; nodes never touched are `Initial`.
    pub fn state(&self, path: &NodePath) -> SubTreeState {
        self.states.get(path).cloned().unwrap_or_default()
    }

    pub fn is_expandable(&self, path: &NodePath) -> bool {
        self.expandable.contains(path)
    }

    /// Expandable nodes whose children are not loaded yet.
    pub fn unloaded(&self) -> HashSet<NodePath> {
        self.expandable
            .iter()
            .filter(|path| self.state(path) != SubTreeState::Done)
            .cloned()
            .collect()
    }

    /// Number of loaded children, known only once the node is `Done`.
    pub fn expected_count(&self, session: &TreeSession, path: &NodePath) -> Option<usize> {
        match self.state(path) {
            SubTreeState::Done => session.find(path).map(|node| node.children.len()),
            _ => None,
        }
    }

    /// Apply an expand/collapse and load children on first expansion.
    pub fn on_expanded_change(
        &mut self,
        session: &mut TreeSession,
        path: &NodePath,
        expanded: bool,
    ) -> SubTreeState {
        session.set_expanded(path, expanded);
        if expanded && self.is_expandable(path) && self.state(path) == SubTreeState::Initial {
            self.load(session, path);
        }
        self.state(path)
    }

    /// Clear an error and load again.
    pub fn retry(&mut self, session: &mut TreeSession, path: &NodePath) -> SubTreeState {
        if matches!(self.state(path), SubTreeState::Error(_)) {
            self.states.insert(path.clone(), SubTreeState::Initial);
            self.load(session, path);
        }
        self.state(path)
    }

    /// Clear an error without loading.
    pub fn dismiss(&mut self, path: &NodePath) {
        if matches!(self.state(path), SubTreeState::Error(_)) {
            self.states.insert(path.clone(), SubTreeState::Initial);
        }
    }

    /// Expand and load `levels` levels of expandable nodes below the top level.
    /// `usize::MAX` loads the whole hierarchy.
    pub fn expand_to_depth(&mut self, session: &mut TreeSession, levels: usize) {
        let mut frontier: Vec<NodePath> = session
            .tree()
            .iter()
            .map(|node| NodePath::new().child(node.name.clone()))
            .filter(|path| self.is_expandable(path))
            .collect();

        for _ in 0..levels {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for path in &frontier {
                if self.on_expanded_change(session, path, true) != SubTreeState::Done {
                    continue;
                }
                if let Some(node) = session.find(path) {
                    next.extend(
                        node.children
                            .iter()
                            .map(|child| path.child(child.name.clone()))
                            .filter(|child| self.is_expandable(child)),
                    );
                }
            }
            frontier = next;
        }
    }

    /// Paths whose last load failed, sorted, with their messages.
    pub fn errors(&self) -> Vec<(NodePath, String)> {
        let mut errors: Vec<(NodePath, String)> = self
            .states
            .iter()
            .filter_map(|(path, state)| match state {
                SubTreeState::Error(message) => Some((path.clone(), message.clone())),
                _ => None,
            })
            .collect();
        errors.sort();
        errors
    }

    fn load(&mut self, session: &mut TreeSession, path: &NodePath) {
        self.states.insert(path.clone(), SubTreeState::Loading);
        debug!("load: {}", path);
        match self.source.load_children(path) {
            Ok(children) => {
                self.graft(session, path, children);
                self.states.insert(path.clone(), SubTreeState::Done);
            }
            Err(e) => {
                warn!("load failed for {}: {}", path, e);
                self.states
                    .insert(path.clone(), SubTreeState::Error(e.to_string()));
            }
        }
    }

    fn graft(&mut self, session: &mut TreeSession, path: &NodePath, children: Vec<LoadedChild>) {
        let mut forest = Vec::with_capacity(children.len());
        for child in children {
            if child.expandable {
                self.expandable.insert(path.child(child.node.name.clone()));
            }
            forest.push(Arc::new(child.node));
        }
        session.replace_children(path, forest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Source that fails until `fail_times` attempts have been made.
    struct FlakySource {
        calls: Cell<usize>,
        fail_times: usize,
    }

    impl ChildSource for FlakySource {
        fn load_children(&self, path: &NodePath) -> ApplicationResult<Vec<LoadedChild>> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if path.is_empty() {
                return Ok(vec![LoadedChild {
                    node: TreeNode::leaf("async"),
                    expandable: true,
                }]);
            }
            if call <= self.fail_times {
                return Err(ApplicationError::Load {
                    path: PathBuf::from(path.to_string()),
                    message: "Failed to load items".into(),
                });
            }
            Ok(["Avatar.tsx", "Button.tsx", "Checkbox.tsx"]
                .into_iter()
                .map(|name| LoadedChild {
                    node: TreeNode::leaf(name),
                    expandable: false,
                })
                .collect())
        }
    }

    fn loader(fail_times: usize) -> SubTreeLoader<FlakySource> {
        SubTreeLoader::new(FlakySource {
            calls: Cell::new(0),
            fail_times,
        })
    }

    #[test]
    fn given_first_expand_when_source_succeeds_then_done_with_children() {
        let mut loader = loader(0);
        let mut session = loader.load_root().unwrap();
        let path = NodePath::parse("async");
        assert_eq!(loader.state(&path), SubTreeState::Initial);
        assert_eq!(loader.expected_count(&session, &path), None);
        assert!(loader.unloaded().contains(&path));

        let state = loader.on_expanded_change(&mut session, &path, true);

        assert_eq!(state, SubTreeState::Done);
        assert_eq!(loader.expected_count(&session, &path), Some(3));
        assert!(session.find(&path).unwrap().expanded);
        assert!(loader.unloaded().is_empty());
    }

    #[test]
    fn given_done_node_when_expanded_again_then_not_refetched() {
        let mut loader = loader(0);
        let mut session = loader.load_root().unwrap();
        let path = NodePath::parse("async");
        loader.on_expanded_change(&mut session, &path, true);
        loader.on_expanded_change(&mut session, &path, false);
        loader.on_expanded_change(&mut session, &path, true);
        // one root load plus one child load
        assert_eq!(loader.source().calls.get(), 2);
    }

    #[test]
    fn given_failing_source_when_expand_then_error_until_retry() {
        let mut loader = loader(1);
        let mut session = loader.load_root().unwrap();
        let path = NodePath::parse("async");

        let state = loader.on_expanded_change(&mut session, &path, true);
        assert_eq!(
            state,
            SubTreeState::Error("cannot load async: Failed to load items".into())
        );
        assert_eq!(loader.errors().len(), 1);

        // expanding again does not clear the error
        loader.on_expanded_change(&mut session, &path, true);
        assert!(matches!(loader.state(&path), SubTreeState::Error(_)));

        assert_eq!(loader.retry(&mut session, &path), SubTreeState::Done);
        assert!(loader.errors().is_empty());
    }

    #[test]
    fn given_error_when_dismiss_then_initial_without_loading() {
        let mut loader = loader(5);
        let mut session = loader.load_root().unwrap();
        let path = NodePath::parse("async");
        loader.on_expanded_change(&mut session, &path, true);
        let calls = loader.source().calls.get();

        loader.dismiss(&path);

        assert_eq!(loader.state(&path), SubTreeState::Initial);
        assert_eq!(loader.source().calls.get(), calls);
    }

    #[test]
    fn given_non_expandable_node_when_expand_then_no_load() {
        let mut loader = loader(0);
        let mut session = loader.load_root().unwrap();
        let path = NodePath::parse("async");
        loader.on_expanded_change(&mut session, &path, true);
        let leaf = path.child("Avatar.tsx");

        let state = loader.on_expanded_change(&mut session, &leaf, true);

        assert_eq!(state, SubTreeState::Initial);
        assert!(session.find(&leaf).unwrap().expanded);
    }
}
