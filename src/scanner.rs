/*!
 * Directory listing functionality
 *
 * Reads the immediate entries of one directory, classifies them and
 * returns them in display order: directories first, then files, each
 * group sorted case-insensitively by name.
 */

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::types::DirEntryInfo;

/// Errors that can occur while listing a directory
#[derive(Error, Debug)]
pub enum ScanError {
    /// The directory exists but cannot be read
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path no longer exists
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Any other IO failure
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Directory being listed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl ScanError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Source of directory listings for the tree
pub trait DirectoryLister {
    /// List the immediate entries of `path` in display order
    fn list(&self, path: &Path) -> Result<Vec<DirEntryInfo>, ScanError>;
}

/// Filesystem-backed directory lister
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    /// Glob patterns matched against entry names; matches are hidden
    ignore_patterns: Vec<String>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(ignore_patterns: Vec<String>) -> Self {
        Self { ignore_patterns }
    }

    /// Check if an entry should be hidden based on the ignore patterns
    pub fn should_ignore(&self, name: &str) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| glob_match(pattern, name))
    }
}

impl DirectoryLister for Scanner {
    fn list(&self, path: &Path) -> Result<Vec<DirEntryInfo>, ScanError> {
        let metadata = path
            .metadata()
            .map_err(|e| ScanError::from_io(path, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(path.to_path_buf()));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                // Failing to open the directory itself is reported at depth 0
                Err(e) if e.depth() == 0 => {
                    let err = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk failed"));
                    return Err(ScanError::from_io(path, err));
                }
                Err(e) => {
                    debug!("Skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            let info = DirEntryInfo::from_os(entry.file_name().to_os_string(), false);
            if self.should_ignore(&info.name) {
                continue;
            }

            // Symlinks are shown as what they point to; broken ones become files
            let is_dir = entry.file_type().is_dir()
                || (entry.path_is_symlink() && entry.path().is_dir());

            entries.push(DirEntryInfo { is_dir, ..info });
        }

        sort_entries(&mut entries);
        debug!("Listed {} entries in {}", entries.len(), path.display());
        Ok(entries)
    }
}

/// Display ordering: directories before files, then case-insensitive name
pub fn compare_entries(a: &DirEntryInfo, b: &DirEntryInfo) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.file_name.cmp(&b.file_name))
}

/// Sort entries in display order
pub fn sort_entries(entries: &mut [DirEntryInfo]) {
    entries.sort_by(compare_entries);
}
