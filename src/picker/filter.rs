//! Subsequence matching

use crate::provider::{Item, tree_rows};

/// A display row that survived filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Flattened item; `display` carries the tree prefix
    pub item: Item,
    /// Byte length of the tree-drawing prefix at the start of `item.display`
    pub prefix_len: usize,
    /// Byte offsets into `item.display` of the matched characters
    pub positions: Vec<usize>,
}

/// Byte offsets of a greedy left-to-right subsequence match of `query` in `text`
///
/// Comparison is per character after lowercasing both sides. Returns `None`
/// unless every query character is consumed; an empty query matches with no
/// positions.
pub fn match_positions(text: &str, query: &str) -> Option<Vec<usize>> {
    let mut wanted = query.chars().flat_map(char::to_lowercase).peekable();
    let mut positions = Vec::new();

    for (offset, ch) in text.char_indices() {
        let Some(&next) = wanted.peek() else {
            break;
        };
        if ch.to_lowercase().eq(std::iter::once(next)) {
            positions.push(offset);
            wanted.next();
        }
    }

    if wanted.peek().is_none() {
        Some(positions)
    } else {
        None
    }
}

/// Flat filter over displays, order preserved
pub fn filter_items(items: &[Item], query: &str) -> Vec<Entry> {
    items
        .iter()
        .filter_map(|item| {
            match_positions(&item.display, query).map(|positions| Entry {
                item: item.clone(),
                prefix_len: 0,
                positions,
            })
        })
        .collect()
}

/// Tree-aware filter
///
/// A matching item is kept with all of its children. A non-matching item is
/// kept only if some descendant matches, and then carries only those.
pub fn filter_tree(items: &[Item], query: &str) -> Vec<Item> {
    items
        .iter()
        .filter_map(|item| {
            if match_positions(&item.display, query).is_some() {
                return Some(item.clone());
            }

            let children = filter_tree(&item.sub_items, query);
            if children.is_empty() {
                None
            } else {
                Some(Item {
                    sub_items: children,
                    ..item.clone()
                })
            }
        })
        .collect()
}

/// Filter the tree, flatten it, and compute highlight positions per row
pub fn filter_entries(items: &[Item], query: &str) -> Vec<Entry> {
    tree_rows(&filter_tree(items, query))
        .into_iter()
        .map(|row| {
            let shift = row.prefix.len();
            let positions = match_positions(&row.item.display, query)
                .unwrap_or_default()
                .into_iter()
                .map(|p| p + shift)
                .collect();

            let display = row.line();
            Entry {
                item: Item { display, ..row.item },
                prefix_len: shift,
                positions,
            }
        })
        .collect()
}
