//! Cursor over the filtered list
//!
//! The list reads bottom-up like a shell history: the default selection is
//! the last row, right above the query line.

use std::ops::Range;

use super::{Entry, filter_entries};
use crate::provider::Item;

/// Query, filtered rows and cursor
#[derive(Debug, Clone)]
pub struct Selector {
    items: Vec<Item>,
    query: String,
    entries: Vec<Entry>,
    cursor: usize,
    total: usize,
}

impl Selector {
    /// Start with an empty query and the cursor on the last row
    pub fn new(items: Vec<Item>) -> Self {
        let mut selector = Self {
            items,
            query: String::new(),
            entries: Vec::new(),
            cursor: 0,
            total: 0,
        };
        selector.refilter();
        selector.total = selector.entries.len();
        selector
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Row count with an empty query
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item under the cursor, if anything matched
    pub fn selected(&self) -> Option<&Item> {
        self.entries.get(self.cursor).map(|e| &e.item)
    }

    /// Replace the query; the cursor returns to the last row
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.refilter();
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    /// Move toward the top of the list, stopping at the first row
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move toward the query line, stopping at the last row
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Rows to show in a viewport of `height` lines, keeping the cursor centered
    pub fn visible_range(&self, height: usize) -> Range<usize> {
        let len = self.entries.len();
        if len <= height {
            return 0..len;
        }

        let start = self.cursor.saturating_sub(height / 2).min(len - height);
        start..start + height
    }

    fn refilter(&mut self) {
        self.entries = filter_entries(&self.items, &self.query);
        self.cursor = self.entries.len().saturating_sub(1);
    }
}
