use tracing::debug;

use crate::DbPool;

/// Schema statements applied in order at bootstrap. Each is idempotent, so
/// re-running the full list is safe on every startup.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "0001_kv_entry",
        "CREATE TABLE IF NOT EXISTS kv_entry (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    ),
    (
        "0002_submission_log",
        "CREATE TABLE IF NOT EXISTS submission_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            submission_id TEXT NOT NULL,
            service_type TEXT NOT NULL,
            reference_id TEXT NOT NULL,
            status TEXT NOT NULL,
            payload_json TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    ),
    (
        "0003_submission_log_indexes",
        "CREATE INDEX IF NOT EXISTS idx_submission_log_service_type
            ON submission_log (service_type)",
    ),
];

pub async fn run_pending(pool: &DbPool) -> Result<(), sqlx::Error> {
    for (name, sql) in MIGRATIONS {
        sqlx::query(sql).execute(pool).await?;
        debug!(migration = name, "schema statement applied");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::run_pending;
    use crate::connect_with_settings;

    #[tokio::test]
    async fn migrations_create_baseline_tables() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        for table in ["kv_entry", "submission_log"] {
            let count = sqlx::query(
                "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&pool)
            .await
            .expect("check table")
            .get::<i64, _>("count");

            assert_eq!(count, 1, "table `{table}` should exist after migration");
        }

        pool.close().await;
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("first run");
        run_pending(&pool).await.expect("second run");
        pool.close().await;
    }
}
