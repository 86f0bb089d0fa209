use chrono::Utc;
use sqlx::Row;

use super::{KvStore, RepositoryError};
use crate::DbPool;

pub struct SqlKvStore {
    pool: DbPool,
}

impl SqlKvStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl KvStore for SqlKvStore {
    async fn read(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_entry WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get::<String, _>("value")))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO kv_entry (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connect_with_settings, migrations};

    async fn store() -> (DbPool, SqlKvStore) {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");
        (pool.clone(), SqlKvStore::new(pool))
    }

    #[tokio::test]
    async fn read_of_absent_key_is_none() {
        let (pool, store) = store().await;
        assert_eq!(store.read("missing").await.expect("read"), None);
        pool.close().await;
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let (pool, store) = store().await;
        store.write("queue", "[1,2,3]").await.expect("write");
        assert_eq!(store.read("queue").await.expect("read"), Some("[1,2,3]".to_string()));
        pool.close().await;
    }

    #[tokio::test]
    async fn second_write_replaces_the_whole_value() {
        let (pool, store) = store().await;
        store.write("queue", "old").await.expect("first write");
        store.write("queue", "new").await.expect("second write");
        assert_eq!(store.read("queue").await.expect("read"), Some("new".to_string()));
        pool.close().await;
    }
}
