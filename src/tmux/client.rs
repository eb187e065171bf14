//! Typed tmux operations
//!
//! Thin wrappers turning session/window/pane intents into tmux argument lists.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::{TmuxExecutor, TmuxRunner};
use crate::config::SplitDirection;
use crate::error::TmuxError;

/// Tmux key name that submits the typed line
const SUBMIT_KEY: &str = "C-m";

/// Session name as tmux stores it: `.` and `:` become `_`
pub fn normalize_session_name(name: &str) -> String {
    name.replace(['.', ':'], "_")
}

/// Target string for a window: `session:window`
pub fn window_target(session: &str, window: &str) -> String {
    format!("{}:{}", session, window)
}

/// Multiplexer client
#[derive(Clone)]
pub struct TmuxClient {
    runner: Arc<dyn TmuxRunner>,
}

impl TmuxClient {
    pub fn new(runner: Arc<dyn TmuxRunner>) -> Self {
        Self { runner }
    }

    /// Client backed by a real `tmux` binary, optionally on a named socket
    pub fn with_socket(socket: Option<String>) -> Self {
        Self::new(Arc::new(TmuxExecutor::new().with_socket(socket)))
    }

    /// Names of all live sessions
    #[instrument(skip(self))]
    pub async fn list_sessions(&self) -> Result<Vec<String>, TmuxError> {
        let output = self
            .runner
            .run(&["list-sessions", "-F", "#{session_name}"])
            .await?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    /// Live sessions, with "no server running" treated as none
    pub async fn list_sessions_or_empty(&self) -> Result<Vec<String>, TmuxError> {
        match self.list_sessions().await {
            Err(TmuxError::ServerNotRunning) => {
                debug!("No tmux server running, no sessions");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Name of the session the current client is attached to
    pub async fn current_session(&self) -> Result<String, TmuxError> {
        let output = self.runner.run(&["display-message", "-p", "#S"]).await?;
        Ok(output.trim().to_string())
    }

    /// Point the current client at another session
    pub async fn switch_client(&self, session: &str) -> Result<(), TmuxError> {
        self.runner.run(&["switch-client", "-t", session]).await?;
        Ok(())
    }

    /// Attach this terminal to a session (used outside tmux)
    pub async fn attach_session(&self, session: &str) -> Result<(), TmuxError> {
        self.runner
            .run_attached(&["attach-session", "-t", session])
            .await
    }

    /// Create a detached session whose first window is named and rooted at `working_dir`
    pub async fn new_session(
        &self,
        session: &str,
        first_window: &str,
        working_dir: &Path,
    ) -> Result<(), TmuxError> {
        let dir = working_dir.to_string_lossy().into_owned();
        self.runner
            .run(&[
                "new-session",
                "-d",
                "-s",
                session,
                "-n",
                first_window,
                "-c",
                dir.as_str(),
            ])
            .await?;
        Ok(())
    }

    /// Append a window to a session
    pub async fn new_window(
        &self,
        session: &str,
        name: &str,
        working_dir: &Path,
    ) -> Result<(), TmuxError> {
        let target = format!("{}:", session);
        let dir = working_dir.to_string_lossy().into_owned();
        self.runner
            .run(&["new-window", "-t", target.as_str(), "-n", name, "-c", dir.as_str()])
            .await?;
        Ok(())
    }

    /// Split the active pane of `target`; the new pane becomes active
    pub async fn split_window(
        &self,
        target: &str,
        direction: SplitDirection,
        working_dir: &Path,
    ) -> Result<(), TmuxError> {
        let dir = working_dir.to_string_lossy().into_owned();
        self.runner
            .run(&["split-window", "-t", target, direction.as_flag(), "-c", dir.as_str()])
            .await?;
        Ok(())
    }

    /// Type `text` literally into the active pane of `target`, optionally pressing Enter
    ///
    /// The text goes through `-l` so words like `Enter` or `C-c` are not read as key names.
    pub async fn send_keys(&self, target: &str, text: &str, submit: bool) -> Result<(), TmuxError> {
        self.runner
            .run(&["send-keys", "-t", target, "-l", text])
            .await?;
        if submit {
            self.runner.run(&["send-keys", "-t", target, SUBMIT_KEY]).await?;
        }
        Ok(())
    }

    pub async fn set_environment(
        &self,
        session: &str,
        key: &str,
        value: &str,
    ) -> Result<(), TmuxError> {
        self.runner
            .run(&["set-environment", "-t", session, key, value])
            .await?;
        Ok(())
    }

    pub async fn select_window(&self, target: &str) -> Result<(), TmuxError> {
        self.runner.run(&["select-window", "-t", target]).await?;
        Ok(())
    }

    /// Visible content of the active pane, with escape sequences kept
    pub async fn capture_pane(&self, target: &str) -> Result<String, TmuxError> {
        self.runner
            .run(&["capture-pane", "-e", "-p", "-t", target])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmux::testing::RecordingRunner;
    use std::path::PathBuf;

    fn client() -> (Arc<RecordingRunner>, TmuxClient) {
        let runner = Arc::new(RecordingRunner::default());
        (runner.clone(), TmuxClient::new(runner))
    }

    #[tokio::test]
    async fn test_list_sessions_parses_lines() {
        let runner = Arc::new(
            RecordingRunner::default().with_output("list-sessions", "api\n\nweb\n"),
        );
        let client = TmuxClient::new(runner);

        assert_eq!(client.list_sessions().await.unwrap(), vec!["api", "web"]);
    }

    #[tokio::test]
    async fn test_no_server_means_no_sessions() {
        let runner = Arc::new(RecordingRunner::default().server_down());
        let client = TmuxClient::new(runner);

        assert!(matches!(
            client.list_sessions().await,
            Err(TmuxError::ServerNotRunning)
        ));
        assert!(client.list_sessions_or_empty().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_argument_lists() {
        let (runner, client) = client();
        let dir = PathBuf::from("/src/api");

        client.new_session("api", "editor", &dir).await.unwrap();
        client.new_window("api", "logs", &dir).await.unwrap();
        client
            .split_window("api:logs", SplitDirection::Vertical, &dir)
            .await
            .unwrap();
        client.send_keys("api:logs", "tail -f x", true).await.unwrap();
        client.send_keys("api:logs", "C-c", false).await.unwrap();

        assert_eq!(
            runner.calls(),
            vec![
                vec!["new-session", "-d", "-s", "api", "-n", "editor", "-c", "/src/api"],
                vec!["new-window", "-t", "api:", "-n", "logs", "-c", "/src/api"],
                vec!["split-window", "-t", "api:logs", "-v", "-c", "/src/api"],
                vec!["send-keys", "-t", "api:logs", "-l", "tail -f x"],
                vec!["send-keys", "-t", "api:logs", "C-m"],
                vec!["send-keys", "-t", "api:logs", "-l", "C-c"],
            ]
        );
    }

    #[test]
    fn test_normalize_session_name() {
        assert_eq!(normalize_session_name("my.proj"), "my_proj");
        assert_eq!(normalize_session_name("a:b.c"), "a_b_c");
        assert_eq!(normalize_session_name("plain-name"), "plain-name");
    }

    #[tokio::test]
    async fn test_attach_runs_attached() {
        let (runner, client) = client();
        client.attach_session("api").await.unwrap();
        assert_eq!(runner.attached_calls(), vec![vec!["attach-session", "-t", "api"]]);
        assert!(runner.calls().is_empty());
    }
}
