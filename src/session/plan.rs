//! Ordered creation steps for a new session
//!
//! Building the plan is pure; `SessionManager` executes it one tmux command
//! at a time and stops at the first failure.

use std::path::{Path, PathBuf};

use super::CreateStep;
use crate::config::{ProjectConfig, SplitDirection, WindowConfig};
use crate::error::SessionError;
use crate::tmux::window_target;

/// The tmux command behind a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NewSession { first_window: String },
    SetEnv { key: String, value: String },
    SendKeys { text: String },
    Split { direction: SplitDirection },
    NewWindow { name: String },
    SelectWindow,
    SwitchClient,
}

/// One executable step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: CreateStep,
    /// Session or `session:window` the command addresses
    pub target: String,
    pub action: Action,
}

/// Everything needed to build one session from a project template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    pub session: String,
    pub working_dir: PathBuf,
    pub steps: Vec<PlannedStep>,
}

impl SessionPlan {
    /// Lay out the steps for `project` rooted at `working_dir`
    ///
    /// Order: session, environment, first window's panels, every other
    /// window with its panels and command, first window's command, primary
    /// window selection, client switch.
    pub fn build(
        project: &ProjectConfig,
        item_id: &str,
        working_dir: &Path,
    ) -> Result<Self, SessionError> {
        let session = project.session_name(item_id);
        let (first, rest) = project
            .windows
            .split_first()
            .ok_or_else(|| SessionError::NoWindows(session.clone()))?;

        let mut plan = Self {
            session,
            working_dir: working_dir.to_path_buf(),
            steps: Vec::new(),
        };

        plan.push(
            CreateStep::NewSession {
                session: plan.session.clone(),
            },
            plan.session.clone(),
            Action::NewSession {
                first_window: first.window_name.clone(),
            },
        );

        for (key, value) in &project.env {
            plan.push(
                CreateStep::SetEnv { key: key.clone() },
                plan.session.clone(),
                Action::SetEnv {
                    key: key.clone(),
                    value: value.clone(),
                },
            );
        }

        plan.push_panels(first);

        for window in rest {
            plan.push(
                CreateStep::NewWindow {
                    window: window.window_name.clone(),
                },
                plan.session.clone(),
                Action::NewWindow {
                    name: window.window_name.clone(),
                },
            );
            plan.push_panels(window);
            plan.push_window_command(window);
        }

        plan.push_window_command(first);

        if let Some(primary) = project.primary_window() {
            plan.push(
                CreateStep::SelectPrimary {
                    window: primary.window_name.clone(),
                },
                plan.window_target(primary),
                Action::SelectWindow,
            );
        }

        plan.push(
            CreateStep::SwitchClient {
                session: plan.session.clone(),
            },
            plan.session.clone(),
            Action::SwitchClient,
        );

        Ok(plan)
    }

    fn push(&mut self, step: CreateStep, target: String, action: Action) {
        self.steps.push(PlannedStep {
            step,
            target,
            action,
        });
    }

    fn window_target(&self, window: &WindowConfig) -> String {
        window_target(&self.session, &window.window_name)
    }

    /// First panel's command goes to the existing pane; each later panel
    /// splits the active pane and then gets its command
    fn push_panels(&mut self, window: &WindowConfig) {
        let target = self.window_target(window);
        let name = &window.window_name;

        for (index, panel) in window.panels.iter().enumerate() {
            if index > 0 {
                // Validated at load time; vertical is tmux's own default
                let direction = panel.direction.unwrap_or(SplitDirection::Vertical);
                self.push(
                    CreateStep::SplitPanel {
                        window: name.clone(),
                        panel: index,
                    },
                    target.clone(),
                    Action::Split { direction },
                );
            }

            if let Some(ref cmd) = panel.cmd {
                self.push(
                    CreateStep::PanelCommand {
                        window: name.clone(),
                        panel: index,
                    },
                    target.clone(),
                    Action::SendKeys { text: cmd.clone() },
                );
            }
        }
    }

    fn push_window_command(&mut self, window: &WindowConfig) {
        if let Some(ref cmd) = window.cmd {
            self.push(
                CreateStep::WindowCommand {
                    window: window.window_name.clone(),
                },
                self.window_target(window),
                Action::SendKeys { text: cmd.clone() },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelConfig;
    use pretty_assertions::assert_eq;

    fn panel(direction: Option<SplitDirection>, cmd: Option<&str>) -> PanelConfig {
        PanelConfig {
            direction,
            cmd: cmd.map(String::from),
        }
    }

    fn step_names(plan: &SessionPlan) -> Vec<String> {
        plan.steps.iter().map(|s| s.step.to_string()).collect()
    }

    #[test]
    fn test_no_windows_is_an_error() {
        let err = SessionPlan::build(&ProjectConfig::default(), "api", Path::new("/src/api"))
            .unwrap_err();
        assert!(matches!(err, SessionError::NoWindows(ref s) if s == "api"));
    }

    #[test]
    fn test_full_ordering() {
        let mut editor = WindowConfig::new("editor");
        editor.cmd = Some("nvim .".to_string());
        editor.panels = vec![
            panel(None, Some("ls")),
            panel(Some(SplitDirection::Horizontal), Some("git status")),
        ];

        let mut logs = WindowConfig::new("logs");
        logs.primary = Some(true);
        logs.cmd = Some("tail -f log".to_string());

        let mut project = ProjectConfig {
            name: Some("work".to_string()),
            windows: vec![editor, logs],
            ..Default::default()
        };
        project.env.insert("B".to_string(), "2".to_string());
        project.env.insert("A".to_string(), "1".to_string());

        let plan = SessionPlan::build(&project, "api", Path::new("/src/api")).unwrap();
        assert_eq!(plan.session, "work");

        insta::assert_debug_snapshot!(step_names(&plan), @r###"
        [
            "create session 'work'",
            "set environment variable 'A'",
            "set environment variable 'B'",
            "send command to window 'editor' panel 0",
            "split window 'editor' for panel 1",
            "send command to window 'editor' panel 1",
            "create window 'logs'",
            "send command to window 'logs'",
            "send command to window 'editor'",
            "select primary window 'logs'",
            "switch client to session 'work'",
        ]
        "###);

        assert_eq!(plan.steps[4].target, "work:editor");
        assert_eq!(
            plan.steps[4].action,
            Action::Split {
                direction: SplitDirection::Horizontal
            }
        );
        assert_eq!(plan.steps[9].target, "work:logs");
    }

    #[test]
    fn test_panels_without_commands_only_split() {
        let mut window = WindowConfig::new("main");
        window.panels = vec![
            panel(None, None),
            panel(Some(SplitDirection::Vertical), None),
            panel(Some(SplitDirection::Horizontal), None),
        ];
        let project = ProjectConfig {
            windows: vec![window],
            ..Default::default()
        };

        let plan = SessionPlan::build(&project, "api", Path::new("/src/api")).unwrap();
        let actions: Vec<_> = plan.steps.iter().map(|s| s.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                Action::NewSession {
                    first_window: "main".to_string()
                },
                Action::Split {
                    direction: SplitDirection::Vertical
                },
                Action::Split {
                    direction: SplitDirection::Horizontal
                },
                Action::SwitchClient,
            ]
        );
    }
}
