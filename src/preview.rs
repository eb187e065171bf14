//! Preview text for the highlighted item
//!
//! Sessions without a directory show their active pane (ANSI escapes kept).
//! Directories show git worktree details followed by a README or a listing.

use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use crate::git::GitOracle;
use crate::provider::Item;
use crate::tmux::TmuxClient;

/// Lines of a README shown before truncating
const README_LINES: usize = 200;
/// Directory entries listed before truncating
const LISTING_ENTRIES: usize = 100;

const README_NAMES: &[&str] = &["README.md", "README", "readme.md", "README.txt"];

/// Builds preview text
#[derive(Clone)]
pub struct Previewer {
    tmux: TmuxClient,
    oracle: GitOracle,
}

impl Previewer {
    pub fn new(tmux: TmuxClient) -> Self {
        Self {
            tmux,
            oracle: GitOracle::new(),
        }
    }

    pub async fn preview(&self, item: &Item) -> String {
        match item.path {
            Some(ref path) => self.directory(path).await,
            None => self.session(&item.id).await,
        }
    }

    async fn session(&self, name: &str) -> String {
        match self.tmux.capture_pane(name).await {
            Ok(content) => content,
            Err(e) => {
                debug!("Capture failed for '{}': {}", name, e);
                format!("Cannot capture session '{}': {}", name, e)
            }
        }
    }

    async fn directory(&self, path: &Path) -> String {
        let mut out = format!("{}\n", path.display());
        out.push_str(&self.git_summary(path));
        out.push('\n');

        match readme(path).await {
            Some(text) => out.push_str(&text),
            None => out.push_str(&listing(path).await),
        }
        out
    }

    fn git_summary(&self, path: &Path) -> String {
        let mut out = String::new();

        match self.oracle.is_worktree(path) {
            Ok(true) => {
                if let Ok(main) = self.oracle.main_repository_path(path) {
                    let _ = writeln!(out, "worktree of {}", main.display());
                }
                if let Ok(siblings) = self.oracle.sibling_worktrees(path) {
                    for sibling in siblings {
                        let _ = writeln!(out, "  {}", sibling.display());
                    }
                }
            }
            Ok(false) => {
                let _ = writeln!(out, "git repository");
                let worktrees = self.oracle.sibling_worktrees(path).unwrap_or_default();
                if !worktrees.is_empty() {
                    let _ = writeln!(out, "linked worktrees:");
                    for worktree in worktrees {
                        let _ = writeln!(out, "  {}", worktree.display());
                    }
                }
            }
            Err(_) if self.oracle.is_repository(path) => {
                let _ = writeln!(out, "inside a git repository");
            }
            Err(_) => {}
        }

        out
    }
}

async fn readme(dir: &Path) -> Option<String> {
    for name in README_NAMES {
        if let Ok(text) = tokio::fs::read_to_string(dir.join(name)).await {
            return Some(truncate_lines(&text, README_LINES));
        }
    }
    None
}

async fn listing(dir: &Path) -> String {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => return format!("Cannot read directory: {}", e),
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let more = names.len().saturating_sub(LISTING_ENTRIES);
    let mut out = names
        .into_iter()
        .take(LISTING_ENTRIES)
        .collect::<Vec<_>>()
        .join("\n");
    if more > 0 {
        let _ = write!(out, "\n… {} more", more);
    }
    out
}

fn truncate_lines(text: &str, max: usize) -> String {
    let mut lines: Vec<&str> = text.lines().take(max + 1).collect();
    if lines.len() > max {
        lines.truncate(max);
        lines.push("…");
    }
    lines.join("\n")
}
