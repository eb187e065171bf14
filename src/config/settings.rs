//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment variables.
//! CLI flags are applied by the caller on top of the loaded value.

use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PanelConfig, ProjectConfig, SplitDirection, WindowConfig};
use crate::error::{ConfigError, Error, Result};

/// Prefix for environment overrides (`MUX_SESSION_SOCKET`, ...)
pub const ENV_PREFIX: &str = "MUX_SESSION_";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories whose immediate subdirectories are offered for selection
    pub search_paths: Vec<String>,

    /// Tmux socket name (`tmux -L <socket>`); the default server when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,

    /// Template used when no project matches the selected item
    pub default: ProjectConfig,

    /// Named project templates, matched against item ids
    pub project: Vec<ProjectConfig>,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()).into());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;
        debug!(
            "Loaded config from {:?}: {} search paths, {} projects",
            path,
            config.search_paths.len(),
            config.project.len()
        );

        Ok(config)
    }

    /// Validate every project template, the default included
    pub fn validate(&self) -> Result<()> {
        for project in &self.project {
            let label = match project.name.as_deref() {
                Some(name) => format!("project '{}'", name),
                None => "project".to_string(),
            };
            project.validate(&label)?;
        }

        self.default.validate("default")?;
        Ok(())
    }

    /// Find the project template for an item id, falling back to the default
    pub fn project_for(&self, id: &str) -> &ProjectConfig {
        self.project
            .iter()
            .find(|p| p.name.as_deref() == Some(id))
            .unwrap_or(&self.default)
    }

    /// Search paths with a leading `~` expanded to the home directory
    pub fn expanded_search_paths(&self) -> Vec<PathBuf> {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        self.search_paths
            .iter()
            .map(|p| expand_home(p, home.as_deref()))
            .collect()
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the log file used while the picker owns the terminal
    pub fn log_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.cache_dir().join("mux-session.log"))
    }

    /// Starter configuration written by `init`
    pub fn starter(search_paths: Vec<String>) -> Self {
        let mut editor = WindowConfig::new("editor");
        editor.primary = Some(true);
        editor.panels = vec![
            PanelConfig::default(),
            PanelConfig {
                direction: Some(SplitDirection::Horizontal),
                cmd: Some("git status".to_string()),
            },
        ];

        Self {
            search_paths,
            socket: None,
            default: ProjectConfig {
                name: None,
                windows: vec![editor, WindowConfig::new("shell")],
                env: Default::default(),
            },
            project: Vec::new(),
        }
    }

    /// Write a new config file, refusing to overwrite an existing one
    pub fn init(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()).into());
        }

        self.save_to(path)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    /// Render the configuration as indented JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()).into())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "mux-session").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}
