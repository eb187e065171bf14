//! TUI widgets
//!
//! - `ItemList` - bottom-anchored filtered item list
//! - `PreviewView` - titled preview of the highlighted item

mod item_list;
mod preview;

pub use item_list::*;
pub use preview::*;
