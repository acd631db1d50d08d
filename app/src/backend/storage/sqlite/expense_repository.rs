use async_trait::async_trait;
use shared::{ExpenseRecord, ExpenseRequest};
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::error::{StoreError, StoreResult};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::ExpenseStorage;

#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_record(row: &SqliteRow) -> ExpenseRecord {
        ExpenseRecord {
            id: row.get("id"),
            vehicle_id: row.get("vehicle_id"),
            vehicle_plate: row.get("vehicle_plate"),
            category: row.get("category"),
            expense_type: row.get("expense_type"),
            date: row.get("date"),
            amount: row.get("amount"),
            km: row.get("km"),
            notes: row.get("notes"),
        }
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn list_expenses(&self, vehicle_id: i64) -> StoreResult<Vec<ExpenseRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, vehicle_id, vehicle_plate, category, expense_type, date, amount, km, notes
            FROM expenses
            WHERE vehicle_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_record).collect())
    }

    async fn create_expense(&self, request: &ExpenseRequest) -> StoreResult<ExpenseRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (vehicle_id, vehicle_plate, category, expense_type, date, amount, km, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.vehicle_id)
        .bind(&request.vehicle_plate)
        .bind(&request.category)
        .bind(&request.expense_type)
        .bind(&request.date)
        .bind(request.amount)
        .bind(request.km)
        .bind(&request.notes)
        .execute(self.db.pool())
        .await?;

        Ok(ExpenseRecord::from_request(result.last_insert_rowid(), request))
    }

    async fn update_expense(&self, id: i64, request: &ExpenseRequest) -> StoreResult<ExpenseRecord> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET vehicle_id = ?, vehicle_plate = ?, category = ?, expense_type = ?,
                date = ?, amount = ?, km = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(request.vehicle_id)
        .bind(&request.vehicle_plate)
        .bind(&request.category)
        .bind(&request.expense_type)
        .bind(&request.date)
        .bind(request.amount)
        .bind(request.km)
        .bind(&request.notes)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("expense {}", id)));
        }
        Ok(ExpenseRecord::from_request(id, request))
    }

    async fn delete_expense(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }
}
