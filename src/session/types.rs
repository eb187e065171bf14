//! Session switching types

use std::fmt;

/// A single step of building a new session, named for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStep {
    NewSession { session: String },
    SetEnv { key: String },
    /// Send a panel's command to the pane it just got
    PanelCommand { window: String, panel: usize },
    SplitPanel { window: String, panel: usize },
    NewWindow { window: String },
    WindowCommand { window: String },
    SelectPrimary { window: String },
    SwitchClient { session: String },
}

impl fmt::Display for CreateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewSession { session } => write!(f, "create session '{}'", session),
            Self::SetEnv { key } => write!(f, "set environment variable '{}'", key),
            Self::PanelCommand { window, panel } => {
                write!(f, "send command to window '{}' panel {}", window, panel)
            }
            Self::SplitPanel { window, panel } => {
                write!(f, "split window '{}' for panel {}", window, panel)
            }
            Self::NewWindow { window } => write!(f, "create window '{}'", window),
            Self::WindowCommand { window } => write!(f, "send command to window '{}'", window),
            Self::SelectPrimary { window } => write!(f, "select primary window '{}'", window),
            Self::SwitchClient { session } => write!(f, "switch client to session '{}'", session),
        }
    }
}

/// How the terminal ends up on the chosen session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchMode {
    /// Running inside tmux: `switch-client`
    Switch,
    /// Running outside tmux: `attach-session` on this terminal
    Attach,
    /// Only make sure the session exists
    Detached,
}

impl SwitchMode {
    /// `Switch` inside tmux (`$TMUX` set), `Attach` otherwise
    pub fn detect() -> Self {
        Self::from_tmux_env(std::env::var("TMUX").ok().as_deref())
    }

    fn from_tmux_env(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self::Switch,
            _ => Self::Attach,
        }
    }
}

/// What `switch_or_create` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The client was already on the session
    AlreadyActive(String),
    /// An existing session was switched to or attached
    Switched(String),
    /// An existing session was found and left detached
    Exists(String),
    /// A new session was built
    Created(String),
}

impl SwitchOutcome {
    pub fn session(&self) -> &str {
        match self {
            Self::AlreadyActive(s) | Self::Switched(s) | Self::Exists(s) | Self::Created(s) => s,
        }
    }
}
