//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod loader;
mod render;
mod session;
mod tree_file;

pub use loader::{ChildSource, DirectorySource, LoadedChild, SubTreeLoader, SubTreeState};
pub use render::{node_label, render_tree, RenderOptions, TreeRender};
pub use session::TreeSession;
pub use tree_file::TreeFileService;
