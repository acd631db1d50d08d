use async_trait::async_trait;
use shared::{Vehicle, VehicleRequest};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::info;

use crate::backend::error::{StoreError, StoreResult};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::VehicleStorage;

/// SQLite implementation of vehicle storage
#[derive(Clone)]
pub struct VehicleRepository {
    db: DbConnection,
}

impl VehicleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_vehicle(row: &SqliteRow) -> Vehicle {
        Vehicle {
            id: row.get("id"),
            brand: row.get("brand"),
            model: row.get("model"),
            year: row.get("year"),
            plate: row.get("plate"),
            km: row.get("km"),
            soap_date: row.get("soap_date"),
            permit_date: row.get("permit_date"),
            inspection_date: row.get("inspection_date"),
            user_id: row.get("user_id"),
        }
    }

    fn map_unique_violation(error: sqlx::Error, plate: &str) -> StoreError {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::Conflict(format!("plate {} is already registered", plate))
            }
            _ => StoreError::Database(error),
        }
    }
}

#[async_trait]
impl VehicleStorage for VehicleRepository {
    async fn list_vehicles(&self, user_id: i64) -> StoreResult<Vec<Vehicle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, plate, brand, model, year, km, soap_date, permit_date, inspection_date
            FROM vehicles
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_vehicle).collect())
    }

    async fn create_vehicle(&self, request: &VehicleRequest) -> StoreResult<Vehicle> {
        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (user_id, plate, brand, model, year, km, soap_date, permit_date, inspection_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.user_id)
        .bind(&request.plate)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(request.km)
        .bind(&request.soap_date)
        .bind(&request.permit_date)
        .bind(&request.inspection_date)
        .execute(self.db.pool())
        .await
        .map_err(|e| Self::map_unique_violation(e, &request.plate))?;

        let id = result.last_insert_rowid();
        info!("Stored vehicle {} with id {}", request.plate, id);
        Ok(Vehicle::from_request(id, request))
    }

    async fn update_vehicle(&self, id: i64, request: &VehicleRequest) -> StoreResult<Vehicle> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET user_id = ?, plate = ?, brand = ?, model = ?, year = ?, km = ?,
                soap_date = ?, permit_date = ?, inspection_date = ?
            WHERE id = ?
            "#,
        )
        .bind(request.user_id)
        .bind(&request.plate)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(request.km)
        .bind(&request.soap_date)
        .bind(&request.permit_date)
        .bind(&request.inspection_date)
        .bind(id)
        .execute(self.db.pool())
        .await
        .map_err(|e| Self::map_unique_violation(e, &request.plate))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("vehicle {}", id)));
        }
        Ok(Vehicle::from_request(id, request))
    }

    async fn delete_vehicle(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("vehicle {}", id)));
        }
        Ok(())
    }
}
