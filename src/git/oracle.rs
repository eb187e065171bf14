//! Git repository and worktree inspection
//!
//! Answers the questions the directory scanner needs: is this directory a
//! repository, is it a linked worktree, and where does its main repository live.
//! Worktree detection reads the `.git` pointer files directly; repository
//! discovery goes through gitoxide.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::GitError;

const GITDIR_PREFIX: &str = "gitdir:";

/// Filesystem-backed git oracle
#[derive(Debug, Clone, Copy, Default)]
pub struct GitOracle;

impl GitOracle {
    pub fn new() -> Self {
        Self
    }

    /// Whether `path` is inside a git repository (searches parent directories)
    pub fn is_repository(&self, path: impl AsRef<Path>) -> bool {
        gix::discover(path.as_ref()).is_ok()
    }

    /// Whether `path` is governed by a `.git` *file* holding a `gitdir:` pointer
    ///
    /// Returns `NotARepository` when `path` has no `.git` entry at all.
    pub fn is_worktree(&self, path: impl AsRef<Path>) -> Result<bool, GitError> {
        let path = path.as_ref();
        let dot_git = path.join(".git");

        let metadata = match std::fs::metadata(&dot_git) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GitError::NotARepository(path.to_path_buf()));
            }
            Err(source) => return Err(GitError::Read { path: dot_git, source }),
        };

        if metadata.is_dir() {
            return Ok(false);
        }

        let content = read_file(&dot_git)?;
        Ok(content.starts_with(GITDIR_PREFIX))
    }

    /// The common git directory of the main repository a worktree belongs to
    ///
    /// Follows the worktree's `gitdir:` pointer, then that directory's
    /// `commondir` file. A pointer target without `commondir` (e.g. a bare
    /// repository checked out next to its worktrees) is its own common directory.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn worktree_root(&self, path: impl AsRef<Path>) -> Result<PathBuf, GitError> {
        let path = path.as_ref();
        if !self.is_worktree(path)? {
            return Err(GitError::NotAWorktree(path.to_path_buf()));
        }

        let git_dir = self.gitdir_pointer(path)?;
        let commondir_file = git_dir.join("commondir");

        let common = match std::fs::read_to_string(&commondir_file) {
            Ok(content) => {
                let common = PathBuf::from(content.trim());
                if common.is_absolute() {
                    lexical_clean(&common)
                } else {
                    lexical_clean(&git_dir.join(common))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => lexical_clean(&git_dir),
            Err(source) => {
                return Err(GitError::Read {
                    path: commondir_file,
                    source,
                });
            }
        };

        debug!("Worktree common dir: {:?}", common);
        Ok(common)
    }

    /// Checkout directory of the main repository (parent of `worktree_root`)
    pub fn main_repository_path(&self, path: impl AsRef<Path>) -> Result<PathBuf, GitError> {
        let root = self.worktree_root(path)?;
        Ok(root.parent().map(Path::to_path_buf).unwrap_or(root))
    }

    /// Checkout paths of every linked worktree registered with the repository
    /// that `path` belongs to
    ///
    /// Works from the main checkout as well as from any linked worktree.
    pub fn sibling_worktrees(&self, path: impl AsRef<Path>) -> Result<Vec<PathBuf>, GitError> {
        let path = path.as_ref();
        let common = if self.is_worktree(path)? {
            self.worktree_root(path)?
        } else {
            path.join(".git")
        };

        let definitions = common.join("worktrees");
        let entries = match std::fs::read_dir(&definitions) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(GitError::Read {
                    path: definitions,
                    source,
                });
            }
        };

        let mut worktrees = Vec::new();
        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }

            // Each definition's `gitdir` holds `<checkout>/.git`
            let pointer = match std::fs::read_to_string(entry.path().join("gitdir")) {
                Ok(p) => PathBuf::from(p.trim()),
                Err(_) => continue,
            };
            if let Some(checkout) = pointer.parent() {
                worktrees.push(checkout.to_path_buf());
            }
        }

        worktrees.sort();
        Ok(worktrees)
    }

    fn gitdir_pointer(&self, path: &Path) -> Result<PathBuf, GitError> {
        let dot_git = path.join(".git");
        let content = read_file(&dot_git)?;
        let target = content
            .trim()
            .strip_prefix(GITDIR_PREFIX)
            .ok_or_else(|| GitError::InvalidGitFile(dot_git.clone()))?
            .trim();

        let target = PathBuf::from(target);
        if target.is_absolute() {
            Ok(target)
        } else {
            Ok(lexical_clean(&path.join(target)))
        }
    }
}

fn read_file(path: &Path) -> Result<String, GitError> {
    std::fs::read_to_string(path).map_err(|source| GitError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve `.` and `..` components without touching the filesystem
fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
