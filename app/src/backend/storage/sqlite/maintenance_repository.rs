use async_trait::async_trait;
use shared::{MaintenanceRecord, MaintenanceRequest};
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::error::{StoreError, StoreResult};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::MaintenanceStorage;

#[derive(Clone)]
pub struct MaintenanceRepository {
    db: DbConnection,
}

impl MaintenanceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_record(row: &SqliteRow) -> MaintenanceRecord {
        MaintenanceRecord {
            id: row.get("id"),
            vehicle_id: row.get("vehicle_id"),
            vehicle_plate: row.get("vehicle_plate"),
            service_type: row.get("service_type"),
            date: row.get("date"),
            km: row.get("km"),
            notes: row.get("notes"),
            cost: row.get("cost"),
        }
    }
}

#[async_trait]
impl MaintenanceStorage for MaintenanceRepository {
    /// Newest first
    async fn list_maintenance(&self, vehicle_id: i64) -> StoreResult<Vec<MaintenanceRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, vehicle_id, vehicle_plate, service_type, date, km, notes, cost
            FROM maintenance
            WHERE vehicle_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_record).collect())
    }

    async fn create_maintenance(&self, request: &MaintenanceRequest) -> StoreResult<MaintenanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO maintenance (vehicle_id, vehicle_plate, service_type, date, km, notes, cost)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.vehicle_id)
        .bind(&request.vehicle_plate)
        .bind(&request.service_type)
        .bind(&request.date)
        .bind(request.km)
        .bind(&request.notes)
        .bind(request.cost)
        .execute(self.db.pool())
        .await?;

        Ok(MaintenanceRecord::from_request(result.last_insert_rowid(), request))
    }

    async fn update_maintenance(&self, id: i64, request: &MaintenanceRequest) -> StoreResult<MaintenanceRecord> {
        let result = sqlx::query(
            r#"
            UPDATE maintenance
            SET vehicle_id = ?, vehicle_plate = ?, service_type = ?, date = ?, km = ?, notes = ?, cost = ?
            WHERE id = ?
            "#,
        )
        .bind(request.vehicle_id)
        .bind(&request.vehicle_plate)
        .bind(&request.service_type)
        .bind(&request.date)
        .bind(request.km)
        .bind(&request.notes)
        .bind(request.cost)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("maintenance record {}", id)));
        }
        Ok(MaintenanceRecord::from_request(id, request))
    }

    async fn delete_maintenance(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM maintenance WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("maintenance record {}", id)));
        }
        Ok(())
    }
}
