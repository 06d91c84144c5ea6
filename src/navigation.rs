/*!
 * Navigation state machine
 *
 * Interprets user commands against the tree cursor, the selection list
 * cursor and the selection itself.
 */

use std::path::Path;

use tracing::debug;

use crate::selection::SelectionSet;
use crate::tree::TreeModel;
use crate::types::{Focus, NodeId};

/// Commands understood by the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Next row in the focused pane
    MoveDown,
    /// Previous row in the focused pane
    MoveUp,
    /// Collapse the current directory, or move to its parent
    CollapseOrUp,
    /// Expand the current directory, or move into it when already expanded
    ExpandOrInto,
    /// Expand the current directory without moving
    Expand,
    /// Toggle a directory open/closed, or toggle a file's selection
    Activate,
    /// Toggle the current file's selection
    ToggleSelect,
    /// Remove the focused entry from the selection list
    RemoveSelected,
    /// Give input focus to the tree
    FocusTree,
    /// Give input focus to the selection list
    FocusList,
    /// Move input focus to the other pane
    SwitchFocus,
}

/// Tree cursor, list cursor, focus and selection
pub struct Navigator {
    tree: TreeModel,
    selection: SelectionSet,
    cursor: NodeId,
    list_cursor: usize,
    focus: Focus,
}

impl Navigator {
    /// Create a navigator with the cursor on the tree root
    pub fn new(tree: TreeModel) -> Self {
        let cursor = tree.root();
        Self {
            tree,
            selection: SelectionSet::new(),
            cursor,
            list_cursor: 0,
            focus: Focus::Tree,
        }
    }

    /// The tree being navigated
    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    /// Current selection
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Focused tree node
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Path of the focused tree node
    pub fn cursor_path(&self) -> &Path {
        &self.tree.node(self.cursor).path
    }

    /// Focused row of the selection list
    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    /// Pane receiving input
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Apply one command
    pub fn apply(&mut self, command: Command) {
        debug!("Applying {:?} with focus {:?}", command, self.focus);
        match command {
            Command::MoveDown => match self.focus {
                Focus::Tree => self.step_visible(1),
                Focus::List => self.step_list(1),
            },
            Command::MoveUp => match self.focus {
                Focus::Tree => self.step_visible(-1),
                Focus::List => self.step_list(-1),
            },
            Command::CollapseOrUp => self.collapse_or_up(),
            Command::ExpandOrInto => self.expand_or_into(),
            Command::Expand => self.tree.expand(self.cursor),
            Command::Activate => {
                if self.tree.node(self.cursor).is_dir() {
                    self.tree.toggle(self.cursor);
                } else {
                    self.toggle_current();
                }
            }
            Command::ToggleSelect => self.toggle_current(),
            Command::RemoveSelected => self.remove_focused(),
            Command::FocusTree => self.focus = Focus::Tree,
            Command::FocusList => self.focus = Focus::List,
            Command::SwitchFocus => {
                self.focus = match self.focus {
                    Focus::Tree => Focus::List,
                    Focus::List => Focus::Tree,
                }
            }
        }
    }

    fn step_visible(&mut self, delta: isize) {
        let rows = self.tree.visible();
        let Some(position) = rows.iter().position(|&(id, _)| id == self.cursor) else {
            return;
        };
        let target = position as isize + delta;
        if target >= 0 && (target as usize) < rows.len() {
            self.cursor = rows[target as usize].0;
        }
    }

    fn step_list(&mut self, delta: isize) {
        let target = self.list_cursor as isize + delta;
        if target >= 0 && (target as usize) < self.selection.len() {
            self.list_cursor = target as usize;
        }
    }

    fn collapse_or_up(&mut self) {
        if self.tree.node(self.cursor).expansion.is_expanded() {
            self.tree.collapse(self.cursor);
        } else if let Some(parent) = self.tree.parent_of(self.cursor) {
            self.cursor = parent;
        }
    }

    fn expand_or_into(&mut self) {
        let node = self.tree.node(self.cursor);
        if !node.is_dir() {
            return;
        }
        if node.expansion.is_expanded() {
            if let Some(child) = self.tree.first_child(self.cursor) {
                self.cursor = child;
            }
        } else {
            self.tree.expand(self.cursor);
        }
    }

    fn toggle_current(&mut self) {
        let node = self.tree.node(self.cursor);
        if node.is_dir() {
            return;
        }
        let path = node.path.clone();
        let selected = self.selection.toggle(&path);
        debug!(
            "{} {}",
            if selected { "Selected" } else { "Deselected" },
            path.display()
        );
        self.clamp_list_cursor();
    }

    fn remove_focused(&mut self) {
        if self.focus != Focus::List {
            return;
        }
        let Some(path) = self.selection.get(self.list_cursor).map(Path::to_path_buf) else {
            return;
        };
        self.selection.remove(&path);
        debug!("Removed {} from selection", path.display());
        self.clamp_list_cursor();
    }

    fn clamp_list_cursor(&mut self) {
        self.list_cursor = self
            .list_cursor
            .min(self.selection.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::scanner::{DirectoryLister, ScanError};
    use crate::types::DirEntryInfo;

    struct StaticLister;

    impl DirectoryLister for StaticLister {
        fn list(&self, path: &Path) -> Result<Vec<DirEntryInfo>, ScanError> {
            match path.to_str() {
                Some("/w") => Ok(vec![
                    DirEntryInfo::dir("sub"),
                    DirEntryInfo::file("a.txt"),
                    DirEntryInfo::file("Z.txt"),
                ]),
                Some("/w/sub") => Ok(vec![DirEntryInfo::file("b.txt")]),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn navigator() -> Navigator {
        Navigator::new(TreeModel::new("/w", Box::new(StaticLister)))
    }

    fn at(nav: &Navigator) -> PathBuf {
        nav.cursor_path().to_path_buf()
    }

    #[test]
    fn test_move_down_and_up_follow_visible_rows() {
        let mut nav = navigator();
        assert_eq!(at(&nav), PathBuf::from("/w"));

        nav.apply(Command::MoveDown);
        assert_eq!(at(&nav), PathBuf::from("/w/sub"));
        nav.apply(Command::MoveDown);
        assert_eq!(at(&nav), PathBuf::from("/w/a.txt"));
        nav.apply(Command::MoveDown);
        nav.apply(Command::MoveDown);
        assert_eq!(at(&nav), PathBuf::from("/w/Z.txt"));

        nav.apply(Command::MoveUp);
        nav.apply(Command::MoveUp);
        nav.apply(Command::MoveUp);
        nav.apply(Command::MoveUp);
        assert_eq!(at(&nav), PathBuf::from("/w"));
    }

    #[test]
    fn test_expand_or_into_then_collapse_or_up() {
        let mut nav = navigator();
        nav.apply(Command::MoveDown);

        // First press expands, second moves into the directory
        nav.apply(Command::ExpandOrInto);
        assert_eq!(at(&nav), PathBuf::from("/w/sub"));
        nav.apply(Command::ExpandOrInto);
        assert_eq!(at(&nav), PathBuf::from("/w/sub/b.txt"));

        // Moving into a file does nothing
        nav.apply(Command::ExpandOrInto);
        assert_eq!(at(&nav), PathBuf::from("/w/sub/b.txt"));

        nav.apply(Command::CollapseOrUp);
        assert_eq!(at(&nav), PathBuf::from("/w/sub"));
        nav.apply(Command::CollapseOrUp);
        assert!(!nav.tree().node(nav.cursor()).expansion.is_expanded());
        assert_eq!(at(&nav), PathBuf::from("/w/sub"));
        nav.apply(Command::CollapseOrUp);
        assert_eq!(at(&nav), PathBuf::from("/w"));
    }

    #[test]
    fn test_collapse_or_up_at_collapsed_root_is_noop() {
        let mut nav = navigator();
        nav.apply(Command::CollapseOrUp);
        nav.apply(Command::CollapseOrUp);
        assert_eq!(at(&nav), PathBuf::from("/w"));
        assert_eq!(nav.tree().visible().len(), 1);
    }

    #[test]
    fn test_activate_toggles_directories_and_files() {
        let mut nav = navigator();
        nav.apply(Command::MoveDown);
        nav.apply(Command::Activate);
        assert!(nav.tree().node(nav.cursor()).expansion.is_expanded());
        nav.apply(Command::Activate);
        assert!(!nav.tree().node(nav.cursor()).expansion.is_expanded());
        assert!(nav.selection().is_empty());

        nav.apply(Command::MoveDown);
        nav.apply(Command::Activate);
        assert!(nav.selection().contains(Path::new("/w/a.txt")));
        nav.apply(Command::Activate);
        assert!(nav.selection().is_empty());
    }

    #[test]
    fn test_toggle_select_ignores_directories() {
        let mut nav = navigator();
        nav.apply(Command::MoveDown);
        nav.apply(Command::ToggleSelect);
        assert!(nav.selection().is_empty());
    }

    #[test]
    fn test_collapse_keeps_selection() {
        let mut nav = navigator();
        nav.apply(Command::MoveDown);
        nav.apply(Command::ExpandOrInto);
        nav.apply(Command::ExpandOrInto);
        nav.apply(Command::ToggleSelect);
        nav.apply(Command::CollapseOrUp);
        nav.apply(Command::CollapseOrUp);

        assert!(nav.selection().contains(Path::new("/w/sub/b.txt")));
    }

    #[test]
    fn test_switch_focus_keeps_cursor_and_selection() {
        let mut nav = navigator();
        nav.apply(Command::MoveDown);
        nav.apply(Command::MoveDown);
        nav.apply(Command::ToggleSelect);

        nav.apply(Command::SwitchFocus);
        assert_eq!(nav.focus(), Focus::List);
        assert_eq!(at(&nav), PathBuf::from("/w/a.txt"));
        assert_eq!(nav.selection().len(), 1);

        nav.apply(Command::SwitchFocus);
        assert_eq!(nav.focus(), Focus::Tree);
        nav.apply(Command::FocusList);
        nav.apply(Command::FocusList);
        assert_eq!(nav.focus(), Focus::List);
    }

    #[test]
    fn test_remove_selected_keeps_list_cursor_in_bounds() {
        let mut nav = navigator();
        nav.apply(Command::MoveDown);
        nav.apply(Command::MoveDown);
        nav.apply(Command::ToggleSelect);
        nav.apply(Command::MoveDown);
        nav.apply(Command::ToggleSelect);

        nav.apply(Command::FocusList);
        nav.apply(Command::MoveDown);
        assert_eq!(nav.list_cursor(), 1);
        nav.apply(Command::MoveDown);
        assert_eq!(nav.list_cursor(), 1);

        nav.apply(Command::RemoveSelected);
        assert_eq!(nav.list_cursor(), 0);
        assert_eq!(
            nav.selection().ordered_paths().collect::<Vec<_>>(),
            vec![Path::new("/w/a.txt")]
        );

        nav.apply(Command::RemoveSelected);
        assert!(nav.selection().is_empty());
        nav.apply(Command::RemoveSelected);
        assert_eq!(nav.list_cursor(), 0);
    }

    #[test]
    fn test_remove_selected_requires_list_focus() {
        let mut nav = navigator();
        nav.apply(Command::MoveDown);
        nav.apply(Command::MoveDown);
        nav.apply(Command::ToggleSelect);
        nav.apply(Command::RemoveSelected);
        assert_eq!(nav.selection().len(), 1);
    }
}
