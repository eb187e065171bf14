//! Selectable items

use std::path::{Path, PathBuf};

/// Marker for a plain directory without a live session
pub const UNMARKED: &str = "[ ]";
/// Marker for a directory that already has a live session
pub const MARKED: &str = "[x]";
/// Marker for a linked git worktree
pub const WORKTREE: &str = "[w]";
/// Marker for a live tmux session
pub const TMUX: &str = "[TMUX]";

/// A directory or live session offered for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Directory base name or tmux session name
    pub id: String,
    /// Text shown in the list, including its marker
    pub display: String,
    /// Backing directory; `None` for sessions with no directory counterpart
    pub path: Option<PathBuf>,
    /// Worktree children, one level deep
    pub sub_items: Vec<Item>,
    /// Nesting depth, assigned by `flatten_tree`
    pub tree_level: usize,
    pub is_worktree: bool,
}

impl Item {
    /// Plain directory item, displayed with the unmarked prefix
    pub fn directory(
        id: impl Into<String>,
        display: impl AsRef<str>,
        path: impl AsRef<Path>,
    ) -> Self {
        Self {
            id: id.into(),
            display: format!("{} {}", UNMARKED, display.as_ref()),
            path: Some(path.as_ref().to_path_buf()),
            sub_items: Vec::new(),
            tree_level: 0,
            is_worktree: false,
        }
    }

    /// Worktree directory item carrying its subdirectories
    pub fn worktree(id: impl Into<String>, path: impl AsRef<Path>, sub_items: Vec<Item>) -> Self {
        let path = path.as_ref();
        Self {
            id: id.into(),
            display: format!("{} {}", WORKTREE, path.display()),
            path: Some(path.to_path_buf()),
            sub_items,
            tree_level: 0,
            is_worktree: true,
        }
    }

    /// Live tmux session item
    pub fn session(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display: format!("{} {}", TMUX, name),
            id: name,
            path: None,
            sub_items: Vec::new(),
            tree_level: 0,
            is_worktree: false,
        }
    }

    /// Depth-first search by id, descending into worktree children
    pub fn find<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
        items.iter().find_map(|item| {
            if item.id == id {
                Some(item)
            } else {
                Item::find(&item.sub_items, id)
            }
        })
    }
}
