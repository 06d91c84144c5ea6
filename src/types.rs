/*!
 * Core types and data structures for the FileGather application
 */

use std::ffi::OsString;
use std::path::PathBuf;

/// Kind of filesystem entry tracked by the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Directory that may contain other entries
    Directory,
    /// Regular file (or anything that is not a directory)
    File,
}

/// Handle of a node inside the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Expansion state of a directory node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Children have not been fetched yet
    Unloaded,
    /// Children are loaded and shown
    Expanded(Vec<NodeId>),
    /// Children are loaded but hidden
    Collapsed(Vec<NodeId>),
}

impl Expansion {
    /// Cached children, if any were loaded
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Unloaded => &[],
            Self::Expanded(children) | Self::Collapsed(children) => children,
        }
    }

    /// Whether the children are currently shown
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded(_))
    }
}

/// A filesystem entry known to the tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Entry name (the full path for the root)
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Directory or file
    pub kind: NodeKind,
    /// Expansion state; always `Unloaded` for files
    pub expansion: Expansion,
    /// Parent handle, `None` for the root
    pub parent: Option<NodeId>,
}

impl TreeNode {
    /// Whether this node is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// One entry returned by a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Entry name for display and ordering
    pub name: String,
    /// Entry name exactly as stored on disk
    pub file_name: OsString,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl DirEntryInfo {
    /// Build an entry from its on-disk name
    pub fn from_os(file_name: OsString, is_dir: bool) -> Self {
        Self {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            is_dir,
        }
    }

    /// Create a directory entry
    pub fn dir(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self::from_os(name.into(), true)
    }

    /// Create a file entry
    pub fn file(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self::from_os(name.into(), false)
    }
}

/// Which pane currently receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The directory tree
    #[default]
    Tree,
    /// The list of selected files
    List,
}
