use shared::{ExpenseRecord, ExpenseRequest};
use tracing::{info, warn};

use super::{report, AppState};
use crate::backend::error::StateError;

impl AppState {
    pub async fn try_load_expenses(&mut self, vehicle_id: i64) -> Result<usize, StateError> {
        let records = self.collaborators.expenses.list_expenses(vehicle_id).await?;

        self.expenses.clear();
        self.expenses.extend(records);
        Ok(self.expenses.len())
    }

    pub async fn load_expenses(&mut self, vehicle_id: i64) -> bool {
        let result = self.try_load_expenses(vehicle_id).await;
        report("load_expenses", result)
    }

    pub async fn try_create_expense(&mut self, request: ExpenseRequest) -> Result<ExpenseRecord, StateError> {
        let record = self.collaborators.expenses.create_expense(&request).await?;

        info!(
            "Recorded expense {} ({}) of {} for vehicle {}",
            record.category, record.expense_type, record.amount, record.vehicle_plate
        );
        self.expenses.insert(0, record.clone());
        Ok(record)
    }

    pub async fn create_expense(&mut self, request: ExpenseRequest) -> bool {
        let result = self.try_create_expense(request).await;
        report("create_expense", result)
    }

    pub async fn try_update_expense(&mut self, id: i64, request: ExpenseRequest) -> Result<ExpenseRecord, StateError> {
        let record = self.collaborators.expenses.update_expense(id, &request).await?;

        match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(slot) => *slot = record.clone(),
            None => warn!("Updated expense {} is not in the mirror", id),
        }
        Ok(record)
    }

    pub async fn update_expense(&mut self, id: i64, request: ExpenseRequest) -> bool {
        let result = self.try_update_expense(id, request).await;
        report("update_expense", result)
    }

    pub async fn try_delete_expense(&mut self, id: i64) -> Result<(), StateError> {
        self.collaborators.expenses.delete_expense(id).await?;
        self.expenses.retain(|e| e.id != id);
        Ok(())
    }

    pub async fn delete_expense(&mut self, id: i64) -> bool {
        let result = self.try_delete_expense(id).await;
        report("delete_expense", result)
    }
}
