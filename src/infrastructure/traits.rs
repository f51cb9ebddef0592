//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// File name (last path component)
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// List the direct entries of a directory, in no particular order.
    /// Symlinks are resolved; entries without a UTF-8 name are skipped.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // broken or looping link below the listed directory
                Err(e) if e.depth() > 0 => {
                    warn!("skipping entry in {}: {}", path.display(), e);
                    continue;
                }
                Err(e) => return Err(io::Error::from(e)),
            };
            let Some(name) = entry.file_name().to_str() else {
                warn!("skipping non UTF-8 name: {}", entry.path().display());
                continue;
            };
            entries.push(DirEntryInfo {
                name: name.to_string(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_directory_when_list_dir_then_returns_direct_entries_only() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("src")).unwrap();
        std::fs::write(temp.path().join("src/lib.rs"), "").unwrap();
        std::fs::write(temp.path().join("Cargo.toml"), "").unwrap();

        let mut entries = RealFileSystem.list_dir(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            entries,
            vec![
                DirEntryInfo {
                    name: "Cargo.toml".into(),
                    is_dir: false
                },
                DirEntryInfo {
                    name: "src".into(),
                    is_dir: true
                },
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn given_symlinked_directory_when_list_dir_then_listed_as_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("dangling"))
            .unwrap();

        let mut entries = RealFileSystem.list_dir(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<(&str, bool)> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.is_dir))
            .collect();
        assert_eq!(names, vec![("link", true), ("real", true)]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn given_non_utf8_name_when_list_dir_then_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(OsStr::from_bytes(b"bad\xff")), "").unwrap();
        std::fs::write(temp.path().join("good.txt"), "").unwrap();

        let entries = RealFileSystem.list_dir(temp.path()).unwrap();

        assert_eq!(
            entries,
            vec![DirEntryInfo {
                name: "good.txt".into(),
                is_dir: false
            }]
        );
    }

    #[test]
    fn given_missing_directory_when_list_dir_then_errors() {
        let temp = TempDir::new().unwrap();
        assert!(RealFileSystem.list_dir(&temp.path().join("nope")).is_err());
    }
}
