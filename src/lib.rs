//! mux-session - fuzzy-pick a project directory or live tmux session and jump to it
//!
//! Directories under the configured search paths and live tmux sessions are
//! merged into one list, narrowed with a fuzzy query, and the chosen entry is
//! either switched to or built from a per-project window/pane template.
//!
//! # Modules
//!
//! - [`provider`] - item sources, aggregation and tree flattening
//! - [`picker`] - fuzzy filter and selection cursor
//! - [`session`] - switch-or-create state machine and creation plans
//! - [`tmux`] - tmux command runner and typed client
//! - [`git`] - worktree detection
//! - [`preview`] - preview text for the highlighted item
//! - [`tui`] - interactive picker built on ratatui
//! - [`config`] - configuration loading and validation
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod git;
pub mod picker;
pub mod preview;
pub mod provider;
pub mod session;
pub mod tmux;
pub mod tui;

use std::path::PathBuf;

pub use config::{Config, ProjectConfig};
pub use error::{Error, Result};
pub use provider::Item;
pub use session::{SessionManager, SwitchMode, SwitchOutcome};

use provider::{DeduplicatingProvider, DirectoryProvider, ItemProvider, TmuxProvider};
use tmux::TmuxClient;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Directory and session items merged with live sessions marked
pub async fn aggregate(search_paths: Vec<PathBuf>, tmux: TmuxClient) -> Result<Vec<Item>> {
    DeduplicatingProvider::new(
        Box::new(DirectoryProvider::new(search_paths)),
        Box::new(TmuxProvider::new(tmux)),
    )
    .with_mark_duplicates(true)
    .get_items()
    .await
}
