//! Configuration module
//!
//! Handles:
//! - User configuration (`<config dir>/mux-session/config.toml`)
//! - Project session templates (windows, panels, environment)
//! - Validation of templates at load time

mod project;
mod settings;

pub use project::*;
pub use settings::*;
