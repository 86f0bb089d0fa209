use async_trait::async_trait;
use thiserror::Error;

use glint_core::domain::submission::Submission;

pub mod kv;
pub mod memory;
pub mod submission_log;

pub use kv::SqlKvStore;
pub use memory::{InMemoryKvStore, InMemorySubmissionLog};
pub use submission_log::SqlSubmissionLog;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// The durable local store: opaque string values under string keys, written
/// whole. Backends stay swappable behind this seam (sqlite table, flat file,
/// in-memory test double).
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
}

/// A stored submission-log record with its system-assigned row id.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredSubmission {
    pub record_id: i64,
    pub submission: Submission,
}

/// Write-behind sink for submissions that dispatched successfully.
#[async_trait]
pub trait SubmissionLog: Send + Sync {
    async fn record(&self, submission: &Submission) -> Result<StoredSubmission, RepositoryError>;
    async fn list(&self) -> Result<Vec<StoredSubmission>, RepositoryError>;
}
