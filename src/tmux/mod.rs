//! Tmux integration module
//!
//! - `TmuxRunner` - seam for running tmux subcommands
//! - `TmuxExecutor` - real process-backed runner with optional socket
//! - `TmuxClient` - typed session/window/pane operations

mod client;
mod executor;
#[cfg(test)]
pub(crate) mod testing;

pub use client::*;
pub use executor::*;
