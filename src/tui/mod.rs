//! Terminal UI module using ratatui
//!
//! Interactive picker with:
//! - Query line with fuzzy filtering
//! - Bottom-anchored item list with match highlighting
//! - Preview pane for the highlighted item

mod app;
mod event;
mod theme;
mod widgets;

pub use app::*;
pub use event::*;
pub use theme::*;
