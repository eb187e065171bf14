//! Tmux command execution
//!
//! Every multiplexer interaction goes through the [`TmuxRunner`] seam so the
//! session logic can be driven against a recording double in tests.
//! [`TmuxExecutor`] is the real implementation: one `tmux` process per call,
//! awaited to completion, optionally addressed to a named socket (`-L`).

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::error::TmuxError;

/// Runs tmux subcommands
#[async_trait]
pub trait TmuxRunner: Send + Sync {
    /// Run a command and return its stdout
    async fn run(&self, args: &[&str]) -> Result<String, TmuxError>;

    /// Run a command attached to the current terminal (e.g. `attach-session`)
    async fn run_attached(&self, args: &[&str]) -> Result<(), TmuxError>;
}

/// Real tmux executor
#[derive(Debug, Clone, Default)]
pub struct TmuxExecutor {
    /// Socket name passed as `tmux -L <socket>`
    socket: Option<String>,
}

impl TmuxExecutor {
    /// Create an executor talking to the default tmux server
    pub fn new() -> Self {
        Self::default()
    }

    /// Address a named server socket instead of the default one
    pub fn with_socket(mut self, socket: Option<String>) -> Self {
        self.socket = socket.filter(|s| !s.is_empty());
        self
    }

    pub fn socket(&self) -> Option<&str> {
        self.socket.as_deref()
    }

    /// Check if tmux is installed and accessible
    pub async fn check_installed(&self) -> Result<(), TmuxError> {
        let output = Command::new("tmux")
            .arg("-V")
            .output()
            .await
            .map_err(|_| TmuxError::NotInstalled)?;

        if output.status.success() {
            let version = String::from_utf8_lossy(&output.stdout);
            debug!("tmux version: {}", version.trim());
            Ok(())
        } else {
            Err(TmuxError::NotInstalled)
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("tmux");
        if let Some(ref socket) = self.socket {
            cmd.arg("-L").arg(socket);
        }
        cmd.args(args);
        cmd
    }

    fn describe(&self, args: &[&str]) -> String {
        match self.socket {
            Some(ref socket) => format!("tmux -L {} {}", socket, args.join(" ")),
            None => format!("tmux {}", args.join(" ")),
        }
    }
}

#[async_trait]
impl TmuxRunner for TmuxExecutor {
    #[instrument(skip(self))]
    async fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(spawn_error)?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if is_server_missing(&stderr) {
            debug!("tmux server not running: {}", stderr);
            return Err(TmuxError::ServerNotRunning);
        }

        warn!("tmux command failed: {}", stderr);
        Err(TmuxError::CommandFailed {
            command: self.describe(args),
            stderr,
        })
    }

    #[instrument(skip(self))]
    async fn run_attached(&self, args: &[&str]) -> Result<(), TmuxError> {
        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(spawn_error)?;

        if status.success() {
            Ok(())
        } else {
            Err(TmuxError::CommandFailed {
                command: self.describe(args),
                stderr: format!("exited with {}", status),
            })
        }
    }
}

fn spawn_error(e: std::io::Error) -> TmuxError {
    if e.kind() == std::io::ErrorKind::NotFound {
        TmuxError::NotInstalled
    } else {
        TmuxError::Spawn(e)
    }
}

/// Whether tmux stderr says there is no server to talk to
///
/// Other connection failures (e.g. permission denied) are real errors.
fn is_server_missing(stderr: &str) -> bool {
    if stderr.contains("no server running") {
        return true;
    }

    stderr.contains("error connecting to")
        && (stderr.contains("No such file or directory") || stderr.contains("Connection refused"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_prefix() {
        let executor = TmuxExecutor::new().with_socket(Some("work".to_string()));
        assert_eq!(executor.socket(), Some("work"));
        assert_eq!(
            executor.describe(&["list-sessions"]),
            "tmux -L work list-sessions"
        );

        let executor = TmuxExecutor::new().with_socket(Some(String::new()));
        assert_eq!(executor.socket(), None);
        assert_eq!(executor.describe(&["list-sessions"]), "tmux list-sessions");
    }

    #[test]
    fn test_server_missing_detection() {
        assert!(is_server_missing("no server running on /tmp/tmux-1000/default"));
        assert!(is_server_missing(
            "error connecting to /tmp/tmux-1000/x (No such file or directory)"
        ));
        assert!(is_server_missing(
            "error connecting to /tmp/tmux-1000/x (Connection refused)"
        ));
        assert!(!is_server_missing(
            "error connecting to /tmp/tmux-1000/x (Permission denied)"
        ));
        assert!(!is_server_missing("can't find session: foo"));
    }
}
