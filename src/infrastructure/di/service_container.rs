//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::{DirectorySource, SubTreeLoader, TreeFileService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and the I/O boundary shared by all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
        }
    }

    pub fn tree_files(&self) -> TreeFileService {
        TreeFileService::new(Arc::clone(&self.fs))
    }

    /// Loader over a directory, honouring `show_hidden`.
    pub fn directory_loader(&self, root: &Path) -> SubTreeLoader<DirectorySource> {
        let source = DirectorySource::new(Arc::clone(&self.fs), root)
            .with_show_hidden(self.settings.show_hidden);
        SubTreeLoader::new(source)
    }
}
