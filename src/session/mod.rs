//! Session materialization
//!
//! - `SessionPlan` - ordered tmux steps built from a project template
//! - `SessionManager` - attach to a live session or execute a plan
//! - `SwitchMode` - how the client reaches the session afterwards

mod manager;
mod plan;
mod types;

pub use manager::*;
pub use plan::*;
pub use types::*;
