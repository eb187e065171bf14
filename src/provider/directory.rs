//! Directory scanning

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::{Item, ItemProvider};
use crate::error::{GitError, Result};
use crate::git::GitOracle;

/// Offers the immediate subdirectories of each search path
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    search_paths: Vec<PathBuf>,
    oracle: GitOracle,
}

impl DirectoryProvider {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            oracle: GitOracle::new(),
        }
    }

    fn is_worktree(&self, path: &Path) -> bool {
        match self.oracle.is_worktree(path) {
            Ok(is_worktree) => is_worktree,
            Err(GitError::NotARepository(_)) => false,
            Err(e) => {
                warn!("Treating {:?} as a plain directory: {}", path, e);
                false
            }
        }
    }

    async fn scan(&self, root: &Path) -> std::io::Result<Vec<Item>> {
        let mut items = Vec::new();

        for (name, path) in subdirectories(root).await? {
            if !self.is_worktree(&path) {
                items.push(Item::directory(name, path.display().to_string(), &path));
                continue;
            }

            let children = match subdirectories(&path).await {
                Ok(dirs) => dirs
                    .into_iter()
                    .map(|(child, child_path)| Item::directory(child.clone(), child, child_path))
                    .collect(),
                Err(e) => {
                    warn!("Failed to list worktree {:?}: {}", path, e);
                    Vec::new()
                }
            };
            items.push(Item::worktree(name, &path, children));
        }

        Ok(items)
    }
}

#[async_trait]
impl ItemProvider for DirectoryProvider {
    #[instrument(skip(self))]
    async fn get_items(&self) -> Result<Vec<Item>> {
        let mut items = Vec::new();

        for root in &self.search_paths {
            match self.scan(root).await {
                Ok(found) => items.extend(found),
                Err(e) => warn!("Skipping search path {:?}: {}", root, e),
            }
        }

        debug!("Found {} directory items", items.len());
        Ok(items)
    }
}

/// Non-hidden subdirectories of `dir`, sorted by name
async fn subdirectories(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut dirs = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type().await?.is_dir() {
            dirs.push((name, entry.path()));
        }
    }

    dirs.sort();
    Ok(dirs)
}
