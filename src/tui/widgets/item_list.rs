//! Bottom-anchored item list
//!
//! Rows fill the area from the bottom up so the default selection sits
//! right above the query line. Matched characters, markers and the worktree
//! tree prefix are styled separately.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::picker::{Entry, Selector};
use crate::tui::theme::Theme;

/// List of filtered entries with the cursor row highlighted
pub struct ItemList<'a> {
    selector: &'a Selector,
    theme: &'a Theme,
}

impl<'a> ItemList<'a> {
    pub fn new(selector: &'a Selector, theme: &'a Theme) -> Self {
        Self { selector, theme }
    }
}

impl Widget for ItemList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = area.height as usize;
        let range = self.selector.visible_range(height);
        let entries = &self.selector.entries()[range.clone()];
        let padding = height - entries.len();

        for (offset, entry) in entries.iter().enumerate() {
            let y = area.y + (padding + offset) as u16;
            let row = Rect::new(area.x, y, area.width, 1);

            if range.start + offset == self.selector.cursor() {
                buf.set_style(row, self.theme.selection());
            }
            buf.set_line(row.x, row.y, &entry_line(entry, self.theme), row.width);
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Part {
    Tree,
    Marker,
    Text,
    Matched,
}

/// Split an entry's display into styled spans
pub fn entry_line<'a>(entry: &'a Entry, theme: &Theme) -> Line<'a> {
    let display = entry.item.display.as_str();
    let prefix_len = entry.prefix_len;
    let body = &display[prefix_len..];
    let marker_len = if body.starts_with('[') {
        body.find(']').map_or(0, |i| i + 1)
    } else {
        0
    };
    let marker_end = prefix_len + marker_len;
    let marker_style = theme.marker(&display[prefix_len..marker_end]);

    let style_of = |part: Part| match part {
        Part::Tree => Style::default().fg(theme.tree),
        Part::Marker => marker_style,
        Part::Text => Style::default(),
        Part::Matched => theme.matched(),
    };

    let mut spans = Vec::new();
    let mut start = 0;
    let mut current = None;

    for (offset, _) in display.char_indices() {
        let part = if entry.positions.binary_search(&offset).is_ok() {
            Part::Matched
        } else if offset < prefix_len {
            Part::Tree
        } else if offset < marker_end {
            Part::Marker
        } else {
            Part::Text
        };

        if current != Some(part) {
            if let Some(previous) = current {
                spans.push(Span::styled(&display[start..offset], style_of(previous)));
            }
            start = offset;
            current = Some(part);
        }
    }
    if let Some(last) = current {
        spans.push(Span::styled(&display[start..], style_of(last)));
    }

    Line::from(spans)
}
