use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use glint_core::domain::submission::{ServiceType, Submission, SubmissionId, SubmissionStatus};

use super::{RepositoryError, StoredSubmission, SubmissionLog};
use crate::DbPool;

pub struct SqlSubmissionLog {
    pool: DbPool,
}

impl SqlSubmissionLog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SubmissionLog for SqlSubmissionLog {
    async fn record(&self, submission: &Submission) -> Result<StoredSubmission, RepositoryError> {
        let payload_json = serde_json::to_string(&submission.payload)
            .map_err(|error| RepositoryError::Decode(error.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO submission_log (
                submission_id,
                service_type,
                reference_id,
                status,
                payload_json,
                created_at
             ) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(submission.id.0.to_string())
        .bind(submission.service_type.as_str())
        .bind(&submission.reference_id)
        .bind(submission.status.as_str())
        .bind(payload_json)
        .bind(submission.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(StoredSubmission {
            record_id: result.last_insert_rowid(),
            submission: submission.clone(),
        })
    }

    async fn list(&self) -> Result<Vec<StoredSubmission>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, submission_id, service_type, reference_id, status, payload_json, created_at
             FROM submission_log
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(stored_from_row).collect()
    }
}

fn stored_from_row(row: SqliteRow) -> Result<StoredSubmission, RepositoryError> {
    let record_id = row.get::<i64, _>("id");

    let id_raw = row.get::<String, _>("submission_id");
    let id = Uuid::parse_str(&id_raw)
        .map(SubmissionId)
        .map_err(|_| RepositoryError::Decode(format!("invalid submission id `{id_raw}`")))?;

    let service_type_raw = row.get::<String, _>("service_type");
    let service_type = ServiceType::from_str(&service_type_raw)
        .ok_or_else(|| RepositoryError::Decode(format!("unknown service type `{service_type_raw}`")))?;

    let status_raw = row.get::<String, _>("status");
    let status = SubmissionStatus::from_str(&status_raw)
        .ok_or_else(|| RepositoryError::Decode(format!("unknown status `{status_raw}`")))?;

    let payload = serde_json::from_str(&row.get::<String, _>("payload_json"))
        .map_err(|error| RepositoryError::Decode(error.to_string()))?;

    let created_at_raw = row.get::<String, _>("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .map_err(|error| RepositoryError::Decode(error.to_string()))?
        .with_timezone(&Utc);

    Ok(StoredSubmission {
        record_id,
        submission: Submission {
            id,
            created_at,
            service_type,
            status,
            payload,
            reference_id: row.get::<String, _>("reference_id"),
        },
    })
}
