/*!
 * Ordered set of selected files
 */

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Insertion-ordered set of absolute file paths
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    paths: IndexSet<PathBuf>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the path if absent, remove it if present
    ///
    /// Returns `true` if the path is selected afterwards.
    pub fn toggle(&mut self, path: &Path) -> bool {
        if self.contains(path) {
            self.remove(path);
            false
        } else {
            self.add(path);
            true
        }
    }

    /// Append a path; no effect if already selected
    pub fn add(&mut self, path: &Path) {
        if !self.paths.contains(path) {
            self.paths.insert(path.to_path_buf());
        }
    }

    /// Remove a path, keeping the order of the rest
    pub fn remove(&mut self, path: &Path) {
        self.paths.shift_remove(path);
    }

    /// Whether the path is selected
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Selected paths in the order they were added
    pub fn ordered_paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Path at a position in the ordered view
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get_index(index).map(PathBuf::as_path)
    }

    /// Number of selected paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
