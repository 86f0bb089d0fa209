use std::sync::Arc;

use tracing::warn;

use glint_core::domain::submission::{FailedQueueEntry, SubmissionId};

use crate::repositories::{KvStore, RepositoryError};

/// All entries live under this single key; every mutation re-serializes the
/// whole list, so the store's own write is the consistency boundary.
pub const FAILURE_QUEUE_KEY: &str = "glint.failure_queue";

/// Durable collection of submissions whose most recent dispatch attempt
/// failed. Entries are keyed by submission id; `remove` of an absent id is a
/// no-op. Unreadable persisted state is treated as an empty queue, never as a
/// fatal error.
#[derive(Clone)]
pub struct FailureQueue {
    store: Arc<dyn KvStore>,
}

impl FailureQueue {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<FailedQueueEntry> {
        match self.store.read(FAILURE_QUEUE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<FailedQueueEntry>>(&raw) {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(
                        event_name = "failure_queue.corrupt_state",
                        error = %error,
                        "persisted failure queue could not be decoded; treating as empty"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(
                    event_name = "failure_queue.read_failed",
                    error = %error,
                    "failure queue read failed; treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Entries arrive fully stamped (id, timestamp, pending status are set at
    /// submission construction) and are persisted verbatim so a retry resends
    /// exactly the same payload.
    pub async fn append(&self, entry: FailedQueueEntry) -> Result<(), RepositoryError> {
        let mut entries = self.list().await;
        entries.push(entry);
        self.persist(&entries).await
    }

    /// Removes the entry with the given id, if present, and returns the
    /// remaining entries. Removing an absent id leaves the queue untouched.
    pub async fn remove(
        &self,
        id: &SubmissionId,
    ) -> Result<Vec<FailedQueueEntry>, RepositoryError> {
        let mut entries = self.list().await;
        let before = entries.len();
        entries.retain(|entry| &entry.submission.id != id);

        if entries.len() != before {
            self.persist(&entries).await?;
        }

        Ok(entries)
    }

    /// Discards all unsent work. Irreversible.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.persist(&[]).await
    }

    async fn persist(&self, entries: &[FailedQueueEntry]) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(entries)
            .map_err(|error| RepositoryError::Decode(error.to_string()))?;
        self.store.write(FAILURE_QUEUE_KEY, &raw).await
    }
}
