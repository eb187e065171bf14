//! Live tmux sessions as items

use async_trait::async_trait;
use tracing::instrument;

use super::{Item, ItemProvider};
use crate::error::Result;
use crate::tmux::TmuxClient;

pub struct TmuxProvider {
    tmux: TmuxClient,
}

impl TmuxProvider {
    pub fn new(tmux: TmuxClient) -> Self {
        Self { tmux }
    }
}

#[async_trait]
impl ItemProvider for TmuxProvider {
    /// One item per live session; no server running yields no items
    #[instrument(skip(self))]
    async fn get_items(&self) -> Result<Vec<Item>> {
        let sessions = self.tmux.list_sessions_or_empty().await?;
        Ok(sessions.into_iter().map(Item::session).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, TmuxError};
    use crate::tmux::testing::RecordingRunner;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_sessions_become_items() {
        let runner = RecordingRunner::default().with_output("list-sessions", "api\nscratch\n");
        let provider = TmuxProvider::new(TmuxClient::new(Arc::new(runner)));

        let items = provider.get_items().await.unwrap();
        let displays: Vec<_> = items.iter().map(|i| i.display.as_str()).collect();
        assert_eq!(displays, vec!["[TMUX] api", "[TMUX] scratch"]);
        assert!(items.iter().all(|i| i.path.is_none()));
    }

    #[tokio::test]
    async fn test_no_server_is_empty() {
        let runner = RecordingRunner::default().server_down();
        let provider = TmuxProvider::new(TmuxClient::new(Arc::new(runner)));
        assert!(provider.get_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_failures_propagate() {
        let runner = RecordingRunner::default().failing_on("list-sessions");
        let provider = TmuxProvider::new(TmuxClient::new(Arc::new(runner)));

        let err = provider.get_items().await.unwrap_err();
        assert!(matches!(err, Error::Tmux(TmuxError::CommandFailed { .. })));
    }
}
