//! # Storage Traits
//!
//! The collaborator interfaces the reconciliation layer calls into. Both the
//! remote API client and the local SQLite store implement them, so the state
//! layer never knows which one is behind a given entity.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    AlertRecord, AuthResponse, ExpenseRecord, ExpenseRequest, LoginRequest, MaintenanceRecord,
    MaintenanceRequest, NewAlert, RegisterRequest, Vehicle, VehicleRequest,
};

use crate::backend::error::StoreResult;

/// Credential verification and account creation
#[async_trait]
pub trait AuthStorage: Send + Sync {
    /// Verify credentials and open a session
    async fn login(&self, request: &LoginRequest) -> StoreResult<AuthResponse>;

    /// Create an account and open a session for it
    async fn register(&self, request: &RegisterRequest) -> StoreResult<AuthResponse>;

    /// Forget any session material held by the collaborator
    fn end_session(&self) {}
}

#[async_trait]
pub trait VehicleStorage: Send + Sync {
    /// All vehicles owned by a user
    async fn list_vehicles(&self, user_id: i64) -> StoreResult<Vec<Vehicle>>;

    /// Store a new vehicle and return it with its assigned id
    async fn create_vehicle(&self, request: &VehicleRequest) -> StoreResult<Vehicle>;

    /// Replace a vehicle's fields and return the stored representation
    async fn update_vehicle(&self, id: i64, request: &VehicleRequest) -> StoreResult<Vehicle>;

    async fn delete_vehicle(&self, id: i64) -> StoreResult<()>;
}

#[async_trait]
pub trait MaintenanceStorage: Send + Sync {
    async fn list_maintenance(&self, vehicle_id: i64) -> StoreResult<Vec<MaintenanceRecord>>;

    async fn create_maintenance(&self, request: &MaintenanceRequest) -> StoreResult<MaintenanceRecord>;

    async fn update_maintenance(&self, id: i64, request: &MaintenanceRequest) -> StoreResult<MaintenanceRecord>;

    async fn delete_maintenance(&self, id: i64) -> StoreResult<()>;
}

#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    async fn list_expenses(&self, vehicle_id: i64) -> StoreResult<Vec<ExpenseRecord>>;

    async fn create_expense(&self, request: &ExpenseRequest) -> StoreResult<ExpenseRecord>;

    async fn update_expense(&self, id: i64, request: &ExpenseRequest) -> StoreResult<ExpenseRecord>;

    async fn delete_expense(&self, id: i64) -> StoreResult<()>;
}

#[async_trait]
pub trait AlertStorage: Send + Sync {
    /// All stored alerts, newest first
    async fn list_alerts(&self) -> StoreResult<Vec<AlertRecord>>;

    async fn store_alert(&self, alert: &NewAlert) -> StoreResult<AlertRecord>;

    async fn delete_alert(&self, id: i64) -> StoreResult<()>;
}

/// One collaborator per entity type
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Arc<dyn AuthStorage>,
    pub vehicles: Arc<dyn VehicleStorage>,
    pub maintenance: Arc<dyn MaintenanceStorage>,
    pub expenses: Arc<dyn ExpenseStorage>,
    pub alerts: Arc<dyn AlertStorage>,
}

impl Collaborators {
    /// Use a single implementation for every entity
    pub fn uniform<S>(store: Arc<S>) -> Self
    where
        S: AuthStorage + VehicleStorage + MaintenanceStorage + ExpenseStorage + AlertStorage + 'static,
    {
        Self {
            auth: store.clone(),
            vehicles: store.clone(),
            maintenance: store.clone(),
            expenses: store.clone(),
            alerts: store,
        }
    }
}
