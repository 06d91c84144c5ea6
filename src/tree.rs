/*!
 * Lazily loaded directory tree
 *
 * Nodes live in an arena owned by [`TreeModel`] and refer to each other by
 * [`NodeId`]. A directory is listed the first time it is expanded; after
 * that its children are cached for the rest of the session.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::scanner::DirectoryLister;
use crate::types::{Expansion, NodeId, NodeKind, TreeNode};

/// In-memory tree of visited filesystem nodes
pub struct TreeModel {
    /// Node arena; a node's handle is its index
    nodes: Vec<TreeNode>,
    /// Absolute path to handle
    registry: HashMap<PathBuf, NodeId>,
    /// Source of directory listings
    lister: Box<dyn DirectoryLister>,
}

impl TreeModel {
    /// Create a tree rooted at `root`, with the root's children loaded
    pub fn new(root: impl Into<PathBuf>, lister: Box<dyn DirectoryLister>) -> Self {
        let root = root.into();
        let mut model = Self {
            nodes: Vec::new(),
            registry: HashMap::new(),
            lister,
        };
        let name = root.display().to_string();
        let root_id = model.insert(name, root, NodeKind::Directory, None);
        model.expand(root_id);
        model
    }

    fn insert(
        &mut self,
        name: String,
        path: PathBuf,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.registry.insert(path.clone(), id);
        self.nodes.push(TreeNode {
            name,
            path,
            kind,
            expansion: Expansion::Unloaded,
            parent,
        });
        id
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Access a node by handle
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Find a node by its absolute path
    pub fn lookup(&self, path: &Path) -> Option<NodeId> {
        self.registry.get(path).copied()
    }

    /// Show a directory's children, listing it first if needed
    ///
    /// Files are ignored. A listing failure leaves the directory expanded
    /// with no children so browsing can continue elsewhere.
    pub fn expand(&mut self, id: NodeId) {
        if !self.nodes[id.0].is_dir() {
            return;
        }

        match &self.nodes[id.0].expansion {
            Expansion::Expanded(_) => {}
            Expansion::Collapsed(children) => {
                let children = children.clone();
                self.nodes[id.0].expansion = Expansion::Expanded(children);
            }
            Expansion::Unloaded => {
                let children = self.load_children(id);
                self.nodes[id.0].expansion = Expansion::Expanded(children);
            }
        }
    }

    fn load_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let path = self.nodes[id.0].path.clone();
        let entries = match self.lister.list(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Showing {} as empty: {}", path.display(), e);
                return Vec::new();
            }
        };

        debug!("Loaded {} children of {}", entries.len(), path.display());
        entries
            .into_iter()
            .map(|entry| {
                let child_path = path.join(&entry.file_name);
                let kind = if entry.is_dir {
                    NodeKind::Directory
                } else {
                    NodeKind::File
                };
                self.insert(entry.name, child_path, kind, Some(id))
            })
            .collect()
    }

    /// Hide a directory's children, keeping them cached
    pub fn collapse(&mut self, id: NodeId) {
        if let Expansion::Expanded(children) = &self.nodes[id.0].expansion {
            let children = children.clone();
            self.nodes[id.0].expansion = Expansion::Collapsed(children);
        }
    }

    /// Collapse an expanded directory, expand anything else
    pub fn toggle(&mut self, id: NodeId) {
        if self.nodes[id.0].expansion.is_expanded() {
            self.collapse(id);
        } else {
            self.expand(id);
        }
    }

    /// Parent of a node, `None` for the root
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// First child of a directory, loading it first if needed
    ///
    /// Does not change whether the directory is shown expanded unless it
    /// had never been loaded.
    pub fn first_child(&mut self, id: NodeId) -> Option<NodeId> {
        if !self.nodes[id.0].is_dir() {
            return None;
        }
        if self.nodes[id.0].expansion == Expansion::Unloaded {
            self.expand(id);
        }
        self.nodes[id.0].expansion.children().first().copied()
    }

    /// Rows currently visible, depth first from the root, with their depth
    pub fn visible(&self) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        let mut stack = vec![(self.root(), 0)];

        while let Some((id, depth)) = stack.pop() {
            rows.push((id, depth));
            if let Expansion::Expanded(children) = &self.nodes[id.0].expansion {
                stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
            }
        }

        rows
    }
}
