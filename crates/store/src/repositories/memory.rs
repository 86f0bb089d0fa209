use std::collections::HashMap;

use tokio::sync::RwLock;

use glint_core::domain::submission::Submission;

use super::{KvStore, RepositoryError, StoredSubmission, SubmissionLog};

#[derive(Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl KvStore for InMemoryKvStore {
    async fn read(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySubmissionLog {
    records: RwLock<Vec<StoredSubmission>>,
}

#[async_trait::async_trait]
impl SubmissionLog for InMemorySubmissionLog {
    async fn record(&self, submission: &Submission) -> Result<StoredSubmission, RepositoryError> {
        let mut records = self.records.write().await;
        let stored = StoredSubmission {
            record_id: records.len() as i64 + 1,
            submission: submission.clone(),
        };
        records.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<StoredSubmission>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.clone())
    }
}
