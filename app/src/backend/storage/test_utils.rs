//! In-memory collaborator used by the state layer tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::{
    AlertRecord, AuthResponse, ExpenseRecord, ExpenseRequest, LoginRequest, MaintenanceRecord,
    MaintenanceRequest, NewAlert, RegisterRequest, Vehicle, VehicleRequest,
};

use crate::backend::error::{StoreError, StoreResult};
use crate::backend::storage::traits::{
    AlertStorage, AuthStorage, Collaborators, ExpenseStorage, MaintenanceStorage, VehicleStorage,
};

pub const TEST_EMAIL: &str = "juan@example.com";
pub const TEST_PASSWORD: &str = "password123";
pub const TEST_USER_ID: i64 = 7;

#[derive(Default)]
struct Data {
    next_id: i64,
    vehicles: Vec<Vehicle>,
    maintenance: Vec<MaintenanceRecord>,
    expenses: Vec<ExpenseRecord>,
    alerts: Vec<AlertRecord>,
    alert_writes_left: Option<usize>,
    sessions_ended: usize,
}

impl Data {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Implements every storage trait over plain vectors. `set_failing(true)`
/// makes every call return a 500 until switched back.
#[derive(Default)]
pub struct FakeStore {
    data: Mutex<Data>,
    failing: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Let `count` more alert writes succeed, then fail the rest
    pub fn fail_alert_writes_after(&self, count: usize) {
        self.data.lock().unwrap().alert_writes_left = Some(count);
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators::uniform(self.clone())
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.data.lock().unwrap().vehicles.clone()
    }

    pub fn alerts(&self) -> Vec<AlertRecord> {
        self.data.lock().unwrap().alerts.clone()
    }

    pub fn sessions_ended(&self) -> usize {
        self.data.lock().unwrap().sessions_ended
    }

    /// Put a vehicle straight into the store, bypassing the state layer
    pub fn seed_vehicle(&self, request: &VehicleRequest) -> Vehicle {
        let mut data = self.data.lock().unwrap();
        let vehicle = Vehicle::from_request(data.next_id(), request);
        data.vehicles.push(vehicle.clone());
        vehicle
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 500,
                message: "store unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn auth_response(email: &str, name: &str, last_name: &str, phone: &str) -> AuthResponse {
        AuthResponse {
            id: Some(TEST_USER_ID),
            name: name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            token: "token-123".to_string(),
        }
    }
}

#[async_trait]
impl AuthStorage for FakeStore {
    async fn login(&self, request: &LoginRequest) -> StoreResult<AuthResponse> {
        self.check()?;
        if request.email != TEST_EMAIL || request.password != TEST_PASSWORD {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(Self::auth_response(TEST_EMAIL, "Juan", "Pérez", "+56912345678"))
    }

    async fn register(&self, request: &RegisterRequest) -> StoreResult<AuthResponse> {
        self.check()?;
        if request.email == TEST_EMAIL {
            return Err(StoreError::Conflict(format!("email {} is already registered", TEST_EMAIL)));
        }
        Ok(Self::auth_response(&request.email, &request.name, &request.last_name, &request.phone))
    }

    fn end_session(&self) {
        self.data.lock().unwrap().sessions_ended += 1;
    }
}

#[async_trait]
impl VehicleStorage for FakeStore {
    async fn list_vehicles(&self, user_id: i64) -> StoreResult<Vec<Vehicle>> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(data.vehicles.iter().filter(|v| v.user_id == user_id).cloned().collect())
    }

    async fn create_vehicle(&self, request: &VehicleRequest) -> StoreResult<Vehicle> {
        self.check()?;
        Ok(self.seed_vehicle(request))
    }

    async fn update_vehicle(&self, id: i64, request: &VehicleRequest) -> StoreResult<Vehicle> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        let slot = data
            .vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("vehicle {}", id)))?;
        *slot = Vehicle::from_request(id, request);
        Ok(slot.clone())
    }

    async fn delete_vehicle(&self, id: i64) -> StoreResult<()> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        let before = data.vehicles.len();
        data.vehicles.retain(|v| v.id != id);
        if data.vehicles.len() == before {
            return Err(StoreError::NotFound(format!("vehicle {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl MaintenanceStorage for FakeStore {
    async fn list_maintenance(&self, vehicle_id: i64) -> StoreResult<Vec<MaintenanceRecord>> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(data
            .maintenance
            .iter()
            .rev()
            .filter(|m| m.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }

    async fn create_maintenance(&self, request: &MaintenanceRequest) -> StoreResult<MaintenanceRecord> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        let record = MaintenanceRecord::from_request(data.next_id(), request);
        data.maintenance.push(record.clone());
        Ok(record)
    }

    async fn update_maintenance(&self, id: i64, request: &MaintenanceRequest) -> StoreResult<MaintenanceRecord> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        let slot = data
            .maintenance
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("maintenance record {}", id)))?;
        *slot = MaintenanceRecord::from_request(id, request);
        Ok(slot.clone())
    }

    async fn delete_maintenance(&self, id: i64) -> StoreResult<()> {
        self.check()?;
        self.data.lock().unwrap().maintenance.retain(|m| m.id != id);
        Ok(())
    }
}

#[async_trait]
impl ExpenseStorage for FakeStore {
    async fn list_expenses(&self, vehicle_id: i64) -> StoreResult<Vec<ExpenseRecord>> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(data
            .expenses
            .iter()
            .rev()
            .filter(|e| e.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }

    async fn create_expense(&self, request: &ExpenseRequest) -> StoreResult<ExpenseRecord> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        let record = ExpenseRecord::from_request(data.next_id(), request);
        data.expenses.push(record.clone());
        Ok(record)
    }

    async fn update_expense(&self, id: i64, request: &ExpenseRequest) -> StoreResult<ExpenseRecord> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        let slot = data
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("expense {}", id)))?;
        *slot = ExpenseRecord::from_request(id, request);
        Ok(slot.clone())
    }

    async fn delete_expense(&self, id: i64) -> StoreResult<()> {
        self.check()?;
        self.data.lock().unwrap().expenses.retain(|e| e.id != id);
        Ok(())
    }
}

#[async_trait]
impl AlertStorage for FakeStore {
    async fn list_alerts(&self) -> StoreResult<Vec<AlertRecord>> {
        self.check()?;
        let data = self.data.lock().unwrap();
        Ok(data.alerts.iter().rev().cloned().collect())
    }

    async fn store_alert(&self, alert: &NewAlert) -> StoreResult<AlertRecord> {
        self.check()?;
        let mut data = self.data.lock().unwrap();
        match data.alert_writes_left {
            Some(0) => {
                return Err(StoreError::Status {
                    status: 500,
                    message: "alert write rejected".to_string(),
                })
            }
            Some(left) => data.alert_writes_left = Some(left - 1),
            None => {}
        }
        let record = AlertRecord::from_new(data.next_id(), alert);
        data.alerts.push(record.clone());
        Ok(record)
    }

    async fn delete_alert(&self, id: i64) -> StoreResult<()> {
        self.check()?;
        self.data.lock().unwrap().alerts.retain(|a| a.id != id);
        Ok(())
    }
}

/// A vehicle request for the test user with every date far in the future
pub fn vehicle_request(plate: &str) -> VehicleRequest {
    VehicleRequest {
        brand: "Toyota".to_string(),
        model: "Yaris".to_string(),
        year: 2020,
        plate: plate.to_string(),
        km: 45000,
        soap_date: "31/03/2099".to_string(),
        permit_date: "31/03/2099".to_string(),
        inspection_date: "15/08/2099".to_string(),
        user_id: TEST_USER_ID,
    }
}
