//! Error types for mux-session
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::CreateStep;

/// Top-level error type for mux-session
#[derive(Error, Debug)]
pub enum Error {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Tmux error: {0}")]
    Tmux(#[from] TmuxError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Session switch/create errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No window configuration found for session '{0}'")]
    NoWindows(String),

    #[error("Item '{0}' has no directory to create a session in")]
    MissingPath(String),

    #[error("Cannot find item with id '{0}'")]
    ItemNotFound(String),

    #[error("Failed to {step} ({target})")]
    StepFailed {
        step: CreateStep,
        target: String,
        #[source]
        source: TmuxError,
    },

    #[error("Failed to switch client to session '{session}'")]
    SwitchFailed {
        session: String,
        #[source]
        source: TmuxError,
    },
}

/// Tmux integration errors
#[derive(Error, Debug)]
pub enum TmuxError {
    #[error("Tmux is not installed or not in PATH")]
    NotInstalled,

    #[error("Tmux server not running")]
    ServerNotRunning,

    #[error("Tmux command failed: {command} - {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to spawn tmux: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Git inspection errors
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("Not a git worktree: {0}")]
    NotAWorktree(PathBuf),

    #[error("Invalid .git file at {0}: expected 'gitdir:' pointer")]
    InvalidGitFile(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Invalid configuration for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Configuration file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// TUI-related errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Failed to initialize terminal: {0}")]
    InitFailed(String),

    #[error("Failed to restore terminal: {0}")]
    RestoreFailed(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Event handling error: {0}")]
    EventError(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
