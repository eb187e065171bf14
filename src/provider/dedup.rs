//! Aggregation of directory and session items
//!
//! Directory items always come first, in scan order. Sessions follow, minus
//! any whose id already names a directory item (at any depth). With marking
//! enabled, directories that have a live session have their leading `[ ]`
//! swapped for `[x]`.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{Item, ItemProvider, MARKED, UNMARKED};
use crate::error::Result;
use crate::tmux::normalize_session_name;

/// Merges a directory provider with a tmux provider
pub struct DeduplicatingProvider {
    directory: Box<dyn ItemProvider>,
    tmux: Box<dyn ItemProvider>,
    mark_duplicates: bool,
}

impl DeduplicatingProvider {
    pub fn new(directory: Box<dyn ItemProvider>, tmux: Box<dyn ItemProvider>) -> Self {
        Self {
            directory,
            tmux,
            mark_duplicates: false,
        }
    }

    /// Mark directories that already have a live session
    pub fn with_mark_duplicates(mut self, mark: bool) -> Self {
        self.mark_duplicates = mark;
        self
    }
}

#[async_trait]
impl ItemProvider for DeduplicatingProvider {
    #[instrument(skip(self))]
    async fn get_items(&self) -> Result<Vec<Item>> {
        let directories = self.directory.get_items().await?;
        let sessions = self.tmux.get_items().await?;

        let directories = if self.mark_duplicates {
            mark_duplicates(directories, &collect_ids(&sessions))
        } else {
            directories
        };

        Ok(merge(directories, sessions))
    }
}

/// Every id in `items`, children included, as tmux session names
pub fn collect_ids(items: &[Item]) -> HashSet<String> {
    fn walk(items: &[Item], ids: &mut HashSet<String>) {
        for item in items {
            ids.insert(normalize_session_name(&item.id));
            walk(&item.sub_items, ids);
        }
    }

    let mut ids = HashSet::new();
    walk(items, &mut ids);
    ids
}

/// Rebuild the tree with `[x]` on every item whose id has a live session
pub fn mark_duplicates(items: Vec<Item>, session_ids: &HashSet<String>) -> Vec<Item> {
    items
        .into_iter()
        .map(|item| {
            let display = match item.display.strip_prefix(UNMARKED) {
                Some(rest) if session_ids.contains(&normalize_session_name(&item.id)) => {
                    format!("{}{}", MARKED, rest)
                }
                _ => item.display.clone(),
            };

            Item {
                display,
                sub_items: mark_duplicates(item.sub_items, session_ids),
                ..item
            }
        })
        .collect()
}

/// Directory items followed by the sessions they do not already cover
pub fn merge(directories: Vec<Item>, sessions: Vec<Item>) -> Vec<Item> {
    let covered = collect_ids(&directories);
    let (duplicates, uncovered): (Vec<_>, Vec<_>) =
        sessions.into_iter().partition(|s| covered.contains(&s.id));

    debug!(
        "{} sessions already covered by directories, {} appended",
        duplicates.len(),
        uncovered.len()
    );

    let mut items = directories;
    items.extend(uncovered);
    items
}
