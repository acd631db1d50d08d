use async_trait::async_trait;
use shared::{AlertRecord, NewAlert};
use sqlx::Row;

use crate::backend::error::{StoreError, StoreResult};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::AlertStorage;

/// Alerts are kept on the device in every backend mode
#[derive(Clone)]
pub struct AlertRepository {
    db: DbConnection,
}

impl AlertRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlertStorage for AlertRepository {
    async fn list_alerts(&self) -> StoreResult<Vec<AlertRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, message, date, alert_key
            FROM alerts
            ORDER BY id DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| AlertRecord {
                id: row.get("id"),
                title: row.get("title"),
                message: row.get("message"),
                date: row.get("date"),
                key: row.get("alert_key"),
            })
            .collect())
    }

    async fn store_alert(&self, alert: &NewAlert) -> StoreResult<AlertRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO alerts (title, message, date, alert_key)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(&alert.date)
        .bind(&alert.key)
        .execute(self.db.pool())
        .await?;

        Ok(AlertRecord::from_new(result.last_insert_rowid(), alert))
    }

    async fn delete_alert(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("alert {}", id)));
        }
        Ok(())
    }
}
