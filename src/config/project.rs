//! Per-project session templates
//!
//! A `ProjectConfig` describes how a new tmux session is laid out:
//! ordered windows, each split into ordered panels, plus session environment.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tmux::normalize_session_name;

/// Split orientation of a panel relative to the previously active pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitDirection {
    /// Stack panes top/bottom (`split-window -v`)
    #[serde(rename = "v", alias = "vertical")]
    Vertical,
    /// Place panes side by side (`split-window -h`)
    #[serde(rename = "h", alias = "horizontal")]
    Horizontal,
}

impl SplitDirection {
    /// The `split-window` flag for this direction
    pub fn as_flag(&self) -> &'static str {
        match self {
            Self::Vertical => "-v",
            Self::Horizontal => "-h",
        }
    }
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// One pane inside a window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Split direction; unused for the first panel, which reuses the window's pane
    #[serde(rename = "panel_direction", default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SplitDirection>,

    /// Shell command typed into the pane once it exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}

/// One tmux window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub window_name: String,

    #[serde(rename = "panel_config", default)]
    pub panels: Vec<PanelConfig>,

    /// Focus this window after the session is built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,

    /// Command sent to the window after all of its panes exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}

impl WindowConfig {
    /// Create a window with no panels
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            window_name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_primary(&self) -> bool {
        self.primary.unwrap_or(false)
    }
}

/// Template for materializing a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Session name override; absent means "use the item id"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "window", default)]
    pub windows: Vec<WindowConfig>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl ProjectConfig {
    /// Session name for an item: the explicit override if set, else the item id,
    /// normalized the way tmux stores it
    pub fn session_name(&self, item_id: &str) -> String {
        normalize_session_name(self.name.as_deref().unwrap_or(item_id))
    }

    /// The window marked primary, if any
    pub fn primary_window(&self) -> Option<&WindowConfig> {
        self.windows.iter().find(|w| w.is_primary())
    }

    /// Validate the template
    ///
    /// `label` identifies the project in error messages (e.g. `project 'api'`).
    pub fn validate(&self, label: &str) -> Result<(), ConfigError> {
        let primaries = self.windows.iter().filter(|w| w.is_primary()).count();
        if primaries > 1 {
            return Err(ConfigError::InvalidValue {
                key: format!("{}.window.primary", label),
                reason: format!(
                    "only one window can be marked as primary, found {}",
                    primaries
                ),
            });
        }

        for window in &self.windows {
            for (index, panel) in window.panels.iter().enumerate().skip(1) {
                if panel.direction.is_none() {
                    return Err(ConfigError::InvalidValue {
                        key: format!(
                            "{}.window '{}'.panel_config[{}].panel_direction",
                            label, window.window_name, index
                        ),
                        reason: "panel_direction must be 'v' or 'h'".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(direction: Option<SplitDirection>, cmd: Option<&str>) -> PanelConfig {
        PanelConfig {
            direction,
            cmd: cmd.map(String::from),
        }
    }

    #[test]
    fn test_two_primary_windows_rejected() {
        let mut a = WindowConfig::new("a");
        a.primary = Some(true);
        let mut b = WindowConfig::new("b");
        b.primary = Some(true);
        let project = ProjectConfig {
            windows: vec![a, b],
            ..Default::default()
        };

        let err = project.validate("default").unwrap_err();
        assert!(err.to_string().contains("only one window can be marked as primary"));
    }

    #[test]
    fn test_zero_or_one_primary_accepted() {
        let mut project = ProjectConfig {
            windows: vec![WindowConfig::new("a"), WindowConfig::new("b")],
            ..Default::default()
        };
        assert!(project.validate("default").is_ok());

        project.windows[1].primary = Some(true);
        project.windows[0].primary = Some(false);
        assert!(project.validate("default").is_ok());
        assert_eq!(project.primary_window().unwrap().window_name, "b");
    }

    #[test]
    fn test_first_panel_needs_no_direction() {
        let mut window = WindowConfig::new("editor");
        window.panels = vec![
            panel(None, Some("nvim")),
            panel(Some(SplitDirection::Horizontal), None),
        ];
        let project = ProjectConfig {
            windows: vec![window],
            ..Default::default()
        };
        assert!(project.validate("default").is_ok());
    }

    #[test]
    fn test_later_panel_without_direction_rejected() {
        let mut window = WindowConfig::new("editor");
        window.panels = vec![panel(None, None), panel(None, Some("htop"))];
        let project = ProjectConfig {
            windows: vec![window],
            ..Default::default()
        };

        let err = project.validate("project 'api'").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("panel_config[1]"));
        assert!(msg.contains("'v' or 'h'"));
    }

    #[test]
    fn test_session_name_override() {
        let mut project = ProjectConfig::default();
        assert_eq!(project.session_name("repo"), "repo");

        project.name = Some("work".to_string());
        assert_eq!(project.session_name("repo"), "work");

        project.name = None;
        assert_eq!(project.session_name("my.proj"), "my_proj");
    }

    #[test]
    fn test_direction_decoding() {
        let panel: PanelConfig = toml::from_str("panel_direction = \"v\"").unwrap();
        assert_eq!(panel.direction, Some(SplitDirection::Vertical));

        let panel: PanelConfig = toml::from_str("panel_direction = \"horizontal\"").unwrap();
        assert_eq!(panel.direction, Some(SplitDirection::Horizontal));

        assert!(toml::from_str::<PanelConfig>("panel_direction = \"x\"").is_err());
    }
}
