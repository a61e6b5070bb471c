use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::repository::{AppStateRecord, AppStateRepository, StorageError};

use super::SqliteRepository;

#[async_trait]
impl AppStateRepository for SqliteRepository {
    async fn load_state(&self, key: &str) -> Result<Option<AppStateRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT payload
            FROM app_state
            WHERE storage_key = ?1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        AppStateRecord::from_json(&payload).map(Some)
    }

    async fn save_state(
        &self,
        key: &str,
        record: &AppStateRecord,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let payload = record.to_json()?;
        sqlx::query(
            r"
            INSERT INTO app_state (storage_key, payload, saved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at
            ",
        )
        .bind(key)
        .bind(payload)
        .bind(saved_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
