//! Tests for TreeFileService with the real filesystem

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use treenav::application::services::{TreeFileService, TreeSession};
use treenav::application::ApplicationError;
use treenav::domain::{NodePath, NodeStatus, TreeBuilder};
use treenav::infrastructure::traits::RealFileSystem;

const FILES_CHANGED: &str = r#"
[[nodes]]
name = "src"
expanded = true

[[nodes.children]]
name = "Avatar.tsx"
status = "added"

[[nodes.children]]
name = "Button"
expanded = true

[[nodes.children.children]]
name = "Button.tsx"
status = "modified"

[[nodes]]
name = "public"

[[nodes.children]]
name = "favicon.ico"
status = "removed"
"#;

fn service() -> TreeFileService {
    TreeFileService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_tree_file_when_load_then_returns_nested_tree_with_status() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("files.toml");
    fs::write(&path, FILES_CHANGED).unwrap();

    let tree = service().load(&path).unwrap();

    let session = TreeSession::new(tree);
    let button = session
        .find(&NodePath::parse("src/Button/Button.tsx"))
        .expect("nested node");
    assert_eq!(button.status, Some(NodeStatus::Modified));
    assert!(!session.find(&NodePath::parse("public")).unwrap().expanded);
}

#[test]
fn given_missing_file_when_load_then_source_not_found() {
    let temp = TempDir::new().unwrap();
    let err = service().load(&temp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ApplicationError::SourceNotFound(_)));
}

#[test]
fn given_generated_tree_when_save_and_load_then_same_tree() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("demo.toml");
    let tree = TreeBuilder::new().with_breadth(3).generate();

    service().save(&path, &tree).unwrap();
    let loaded = service().load(&path).unwrap();

    assert_eq!(loaded, tree);
}

#[test]
fn given_empty_document_when_load_then_empty_tree() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    assert!(service().load(&path).unwrap().is_empty());
}

#[test]
fn given_unknown_status_when_load_then_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    fs::write(&path, "[[nodes]]\nname = \"a\"\nstatus = \"exploded\"\n").unwrap();

    let err = service().load(&path).unwrap_err();
    assert!(matches!(err, ApplicationError::Parse { .. }));
}
