//! Session manager - switch to or build the session for a selected item
//!
//! Resolving happens before this point (`Config::project_for`). The manager
//! decides between attaching and creating by asking tmux for live sessions,
//! then either moves the client or runs a `SessionPlan`.

use tracing::{debug, info, instrument};

use super::{Action, PlannedStep, SessionPlan, SwitchMode, SwitchOutcome};
use crate::config::ProjectConfig;
use crate::error::{Result, SessionError, TmuxError};
use crate::provider::Item;
use crate::tmux::{TmuxClient, normalize_session_name};

/// Drives tmux for one selection
pub struct SessionManager {
    tmux: TmuxClient,
    mode: SwitchMode,
}

impl SessionManager {
    pub fn new(tmux: TmuxClient, mode: SwitchMode) -> Self {
        Self { tmux, mode }
    }

    /// Attach to the item's session if it is live, otherwise create it
    #[instrument(skip_all, fields(item = %item.id, mode = ?self.mode))]
    pub async fn switch_or_create(
        &self,
        item: &Item,
        project: &ProjectConfig,
    ) -> Result<SwitchOutcome> {
        let sessions = self.tmux.list_sessions_or_empty().await?;
        let live_name = normalize_session_name(&item.id);

        if sessions.contains(&live_name) {
            debug!("Session '{}' is live, attaching", live_name);
            return self.attach(&live_name).await;
        }

        self.create(item, project).await
    }

    async fn attach(&self, session: &str) -> Result<SwitchOutcome> {
        let switch_failed = |source: TmuxError| SessionError::SwitchFailed {
            session: session.to_string(),
            source,
        };

        match self.mode {
            SwitchMode::Switch => {
                let current = self.tmux.current_session().await.map_err(switch_failed)?;
                if current == session {
                    return Ok(SwitchOutcome::AlreadyActive(session.to_string()));
                }

                self.tmux
                    .switch_client(session)
                    .await
                    .map_err(switch_failed)?;
            }
            SwitchMode::Attach => {
                self.tmux
                    .attach_session(session)
                    .await
                    .map_err(switch_failed)?;
            }
            SwitchMode::Detached => return Ok(SwitchOutcome::Exists(session.to_string())),
        }

        info!("Switched to session '{}'", session);
        Ok(SwitchOutcome::Switched(session.to_string()))
    }

    async fn create(&self, item: &Item, project: &ProjectConfig) -> Result<SwitchOutcome> {
        if project.windows.is_empty() {
            let session = project.session_name(&item.id);
            return Err(SessionError::NoWindows(session).into());
        }

        let working_dir = item
            .path
            .as_deref()
            .ok_or_else(|| SessionError::MissingPath(item.id.clone()))?;

        let plan = SessionPlan::build(project, &item.id, working_dir)?;
        info!(
            "Creating session '{}' in {:?} ({} steps)",
            plan.session,
            plan.working_dir,
            plan.steps.len()
        );

        for step in &plan.steps {
            self.execute(&plan, step)
                .await
                .map_err(|source| SessionError::StepFailed {
                    step: step.step.clone(),
                    target: step.target.clone(),
                    source,
                })?;
        }

        Ok(SwitchOutcome::Created(plan.session))
    }

    async fn execute(
        &self,
        plan: &SessionPlan,
        step: &PlannedStep,
    ) -> std::result::Result<(), TmuxError> {
        debug!("Step: {}", step.step);
        let target = step.target.as_str();

        match step.action {
            Action::NewSession { ref first_window } => {
                self.tmux
                    .new_session(&plan.session, first_window, &plan.working_dir)
                    .await
            }
            Action::SetEnv { ref key, ref value } => {
                self.tmux.set_environment(target, key, value).await
            }
            Action::SendKeys { ref text } => self.tmux.send_keys(target, text, true).await,
            Action::Split { direction } => {
                self.tmux
                    .split_window(target, direction, &plan.working_dir)
                    .await
            }
            Action::NewWindow { ref name } => {
                self.tmux.new_window(target, name, &plan.working_dir).await
            }
            Action::SelectWindow => self.tmux.select_window(target).await,
            Action::SwitchClient => match self.mode {
                SwitchMode::Switch => self.tmux.switch_client(target).await,
                SwitchMode::Attach => self.tmux.attach_session(target).await,
                SwitchMode::Detached => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PanelConfig, SplitDirection, WindowConfig};
    use crate::error::Error;
    use crate::tmux::testing::RecordingRunner;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn manager(
        runner: RecordingRunner,
        mode: SwitchMode,
    ) -> (Arc<RecordingRunner>, SessionManager) {
        let runner = Arc::new(runner);
        let manager = SessionManager::new(TmuxClient::new(runner.clone()), mode);
        (runner, manager)
    }

    fn dir_item(id: &str) -> Item {
        Item::directory(id, id, format!("/src/{}", id))
    }

    /// Two windows: the first with two panels, the second with none
    fn two_window_project() -> ProjectConfig {
        let mut editor = WindowConfig::new("editor");
        editor.panels = vec![
            PanelConfig {
                direction: None,
                cmd: Some("nvim".to_string()),
            },
            PanelConfig {
                direction: Some(SplitDirection::Horizontal),
                cmd: Some("git status".to_string()),
            },
        ];

        let mut logs = WindowConfig::new("logs");
        logs.cmd = Some("tail -f app.log".to_string());
        logs.primary = Some(true);

        let mut project = ProjectConfig {
            windows: vec![editor, logs],
            ..Default::default()
        };
        project.env.insert("RUST_LOG".to_string(), "debug".to_string());
        project
    }

    #[tokio::test]
    async fn test_create_issues_commands_in_order() {
        let (runner, manager) = manager(RecordingRunner::default(), SwitchMode::Switch);

        let outcome = manager
            .switch_or_create(&dir_item("api"), &two_window_project())
            .await
            .unwrap();
        assert_eq!(outcome, SwitchOutcome::Created("api".to_string()));

        assert_eq!(
            runner.calls(),
            vec![
                vec!["list-sessions", "-F", "#{session_name}"],
                vec!["new-session", "-d", "-s", "api", "-n", "editor", "-c", "/src/api"],
                vec!["set-environment", "-t", "api", "RUST_LOG", "debug"],
                vec!["send-keys", "-t", "api:editor", "-l", "nvim"],
                vec!["send-keys", "-t", "api:editor", "C-m"],
                vec!["split-window", "-t", "api:editor", "-h", "-c", "/src/api"],
                vec!["send-keys", "-t", "api:editor", "-l", "git status"],
                vec!["send-keys", "-t", "api:editor", "C-m"],
                vec!["new-window", "-t", "api:", "-n", "logs", "-c", "/src/api"],
                vec!["send-keys", "-t", "api:logs", "-l", "tail -f app.log"],
                vec!["send-keys", "-t", "api:logs", "C-m"],
                vec!["select-window", "-t", "api:logs"],
                vec!["switch-client", "-t", "api"],
            ]
        );
    }

    #[tokio::test]
    async fn test_live_session_only_switches() {
        let runner = RecordingRunner::default()
            .with_output("list-sessions", "api\nweb\n")
            .with_output("display-message", "web\n");
        let (runner, manager) = manager(runner, SwitchMode::Switch);

        let outcome = manager
            .switch_or_create(&dir_item("api"), &two_window_project())
            .await
            .unwrap();

        assert_eq!(outcome, SwitchOutcome::Switched("api".to_string()));
        assert_eq!(
            runner.commands(),
            vec!["list-sessions", "display-message", "switch-client"]
        );
    }

    #[tokio::test]
    async fn test_dotted_id_uses_tmux_session_name() {
        let (created, creator) = manager(RecordingRunner::default(), SwitchMode::Detached);
        let outcome = creator
            .switch_or_create(&dir_item("my.proj"), &two_window_project())
            .await
            .unwrap();

        assert_eq!(outcome, SwitchOutcome::Created("my_proj".to_string()));
        let calls = created.calls();
        assert_eq!(
            calls[1],
            vec!["new-session", "-d", "-s", "my_proj", "-n", "editor", "-c", "/src/my.proj"]
        );
        assert!(calls.iter().any(|c| c.contains(&"my_proj:editor".to_string())));

        let live = RecordingRunner::default().with_output("list-sessions", "my_proj\n");
        let (reused, reuser) = manager(live, SwitchMode::Detached);
        let outcome = reuser
            .switch_or_create(&dir_item("my.proj"), &two_window_project())
            .await
            .unwrap();

        assert_eq!(outcome, SwitchOutcome::Exists("my_proj".to_string()));
        assert_eq!(reused.commands(), vec!["list-sessions"]);
    }

    #[tokio::test]
    async fn test_already_active_session_is_a_no_op() {
        let runner = RecordingRunner::default()
            .with_output("list-sessions", "api\n")
            .with_output("display-message", "api\n");
        let (runner, manager) = manager(runner, SwitchMode::Switch);

        let outcome = manager
            .switch_or_create(&dir_item("api"), &two_window_project())
            .await
            .unwrap();

        assert_eq!(outcome, SwitchOutcome::AlreadyActive("api".to_string()));
        assert!(!runner.commands().iter().any(|c| c == "switch-client"));
    }

    #[tokio::test]
    async fn test_attach_mode_uses_attached_runner() {
        let runner = RecordingRunner::default().with_output("list-sessions", "api\n");
        let (runner, manager) = manager(runner, SwitchMode::Attach);

        manager
            .switch_or_create(&dir_item("api"), &two_window_project())
            .await
            .unwrap();

        assert_eq!(runner.commands(), vec!["list-sessions"]);
        assert_eq!(runner.attached_calls(), vec![vec!["attach-session", "-t", "api"]]);
    }

    #[tokio::test]
    async fn test_detached_create_skips_client_switch() {
        let runner = RecordingRunner::default().server_down();
        let (runner, manager) = manager(runner, SwitchMode::Detached);

        let outcome = manager
            .switch_or_create(&dir_item("api"), &two_window_project())
            .await
            .unwrap();

        assert_eq!(outcome, SwitchOutcome::Created("api".to_string()));
        let commands = runner.commands();
        assert_eq!(commands.last().map(String::as_str), Some("select-window"));
        assert!(runner.attached_calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_aborts_and_names_step() {
        let runner = RecordingRunner::default().failing_on("split-window");
        let (runner, manager) = manager(runner, SwitchMode::Switch);

        let err = manager
            .switch_or_create(&dir_item("api"), &two_window_project())
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("split window 'editor' for panel 1"), "{}", msg);
        assert!(msg.contains("api:editor"), "{}", msg);
        assert_eq!(runner.commands().last().map(String::as_str), Some("split-window"));
        assert!(!runner.commands().iter().any(|c| c == "new-window"));
    }

    #[tokio::test]
    async fn test_no_windows_and_missing_path() {
        let (runner, manager) = manager(RecordingRunner::default(), SwitchMode::Switch);

        let err = manager
            .switch_or_create(&dir_item("api"), &ProjectConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Session(SessionError::NoWindows(_))));

        let err = manager
            .switch_or_create(&Item::session("ghost"), &two_window_project())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Session(SessionError::MissingPath(_))));

        assert_eq!(runner.commands(), vec!["list-sessions", "list-sessions"]);
    }

    #[tokio::test]
    async fn test_name_override_used_for_new_session() {
        let (runner, manager) = manager(RecordingRunner::default(), SwitchMode::Detached);
        let mut project = two_window_project();
        project.name = Some("work".to_string());

        let outcome = manager.switch_or_create(&dir_item("api"), &project).await.unwrap();
        assert_eq!(outcome.session(), "work");
        assert_eq!(runner.calls()[1][3], "work");
    }
}
