//! Preview pane
//!
//! Captured panes keep their ANSI colors and their own line layout.
//! Directory details are plain text wrapped to the pane width.

use ansi_to_tui::IntoText;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Text,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::provider::Item;
use crate::tui::theme::Theme;

const EMPTY_TITLE: &str = "Preview";

/// Where the preview text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// `capture-pane` output of a live session
    Pane,
    /// Path, git details and README or listing of a directory
    Details,
}

impl PreviewKind {
    pub fn of(item: &Item) -> Self {
        if item.path.is_some() {
            Self::Details
        } else {
            Self::Pane
        }
    }
}

/// Preview built for one highlighted row, with its scroll position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPane {
    /// Display string of the row this preview belongs to
    pub key: String,
    pub title: String,
    pub kind: PreviewKind,
    pub text: String,
    /// First visible row
    pub offset: u16,
    /// Inner size of the pane at the last render
    viewport: (u16, u16),
}

impl PreviewPane {
    pub fn new(item: &Item, text: String) -> Self {
        let kind = PreviewKind::of(item);
        let title = match kind {
            PreviewKind::Pane => format!("session {}", item.id),
            PreviewKind::Details => item.id.clone(),
        };

        Self {
            key: item.display.clone(),
            title,
            kind,
            text,
            offset: 0,
            viewport: (0, 0),
        }
    }

    /// Rows the text takes up at `width` columns
    pub fn rows_at(&self, width: u16) -> usize {
        match self.kind {
            PreviewKind::Details if width > 0 => self
                .text
                .lines()
                .map(|line| line.chars().count().div_ceil(width as usize).max(1))
                .sum(),
            _ => self.text.lines().count(),
        }
    }

    /// Record the visible size and keep the offset inside the content
    pub fn fit(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.clamp();
    }

    /// Scroll half a viewport down
    pub fn half_page_down(&mut self) {
        self.offset = self.offset.saturating_add(self.half_page());
        self.clamp();
    }

    /// Scroll half a viewport up
    pub fn half_page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.half_page());
    }

    fn half_page(&self) -> u16 {
        (self.viewport.1 / 2).max(1)
    }

    fn clamp(&mut self) {
        let (width, height) = self.viewport;
        let max = self.rows_at(width).saturating_sub(height as usize);
        self.offset = self.offset.min(max.min(u16::MAX as usize) as u16);
    }
}

/// Bordered preview of the highlighted item
pub struct PreviewView<'a> {
    pane: Option<&'a PreviewPane>,
    theme: &'a Theme,
}

impl<'a> PreviewView<'a> {
    pub fn new(pane: Option<&'a PreviewPane>, theme: &'a Theme) -> Self {
        Self { pane, theme }
    }
}

impl Widget for PreviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = self.pane.map_or(EMPTY_TITLE, |p| p.title.as_str());
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        let Some(pane) = self.pane else {
            block.render(area, buf);
            return;
        };

        let paragraph = match pane.kind {
            PreviewKind::Pane => {
                let text = pane
                    .text
                    .as_str()
                    .into_text()
                    .unwrap_or_else(|_| Text::raw(pane.text.as_str()));
                Paragraph::new(text)
            }
            PreviewKind::Details => {
                Paragraph::new(pane.text.as_str()).wrap(Wrap { trim: false })
            }
        };

        paragraph
            .block(block)
            .scroll((pane.offset, 0))
            .render(area, buf);
    }
}
