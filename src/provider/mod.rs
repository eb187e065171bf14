//! Item sources and the aggregation pipeline
//!
//! - `DirectoryProvider` - subdirectories of the configured search paths
//! - `TmuxProvider` - live tmux sessions
//! - `DeduplicatingProvider` - both of the above, merged and marked
//! - `flatten_tree` - nested worktree items turned into display rows

mod dedup;
mod directory;
mod item;
mod tmux;
mod tree;

use async_trait::async_trait;

pub use dedup::*;
pub use directory::*;
pub use item::*;
pub use tmux::*;
pub use tree::*;

use crate::error::Result;

/// A source of selectable items
#[async_trait]
pub trait ItemProvider: Send + Sync {
    async fn get_items(&self) -> Result<Vec<Item>>;
}
