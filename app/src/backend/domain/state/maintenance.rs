use shared::{MaintenanceRecord, MaintenanceRequest};
use tracing::{info, warn};

use super::{report, AppState};
use crate::backend::error::StateError;

impl AppState {
    /// Replace the maintenance mirror with one vehicle's service history
    pub async fn try_load_maintenance(&mut self, vehicle_id: i64) -> Result<usize, StateError> {
        let records = self.collaborators.maintenance.list_maintenance(vehicle_id).await?;

        self.maintenance.clear();
        self.maintenance.extend(records);
        Ok(self.maintenance.len())
    }

    pub async fn load_maintenance(&mut self, vehicle_id: i64) -> bool {
        let result = self.try_load_maintenance(vehicle_id).await;
        report("load_maintenance", result)
    }

    /// New records go to the front of the list
    pub async fn try_create_maintenance(&mut self, request: MaintenanceRequest) -> Result<MaintenanceRecord, StateError> {
        let record = self.collaborators.maintenance.create_maintenance(&request).await?;

        info!("Recorded {} for vehicle {}", record.service_type, record.vehicle_plate);
        self.maintenance.insert(0, record.clone());
        Ok(record)
    }

    pub async fn create_maintenance(&mut self, request: MaintenanceRequest) -> bool {
        let result = self.try_create_maintenance(request).await;
        report("create_maintenance", result)
    }

    pub async fn try_update_maintenance(
        &mut self,
        id: i64,
        request: MaintenanceRequest,
    ) -> Result<MaintenanceRecord, StateError> {
        let record = self.collaborators.maintenance.update_maintenance(id, &request).await?;

        match self.maintenance.iter_mut().find(|m| m.id == id) {
            Some(slot) => *slot = record.clone(),
            None => warn!("Updated maintenance record {} is not in the mirror", id),
        }
        Ok(record)
    }

    pub async fn update_maintenance(&mut self, id: i64, request: MaintenanceRequest) -> bool {
        let result = self.try_update_maintenance(id, request).await;
        report("update_maintenance", result)
    }

    pub async fn try_delete_maintenance(&mut self, id: i64) -> Result<(), StateError> {
        self.collaborators.maintenance.delete_maintenance(id).await?;
        self.maintenance.retain(|m| m.id != id);
        Ok(())
    }

    pub async fn delete_maintenance(&mut self, id: i64) -> bool {
        let result = self.try_delete_maintenance(id).await;
        report("delete_maintenance", result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::backend::storage::test_utils::FakeStore;
    use shared::MaintenanceRequest;

    fn request(vehicle_id: i64, service_type: &str) -> MaintenanceRequest {
        MaintenanceRequest {
            vehicle_id,
            vehicle_plate: "AA-BB-11".to_string(),
            service_type: service_type.to_string(),
            date: "10/10/2026".to_string(),
            km: 45000,
            notes: None,
            cost: Some(45000),
        }
    }

    #[tokio::test]
    async fn test_create_prepends() {
        let store = FakeStore::new();
        let mut state = logged_in_state(&store).await;

        assert!(state.create_maintenance(request(1, "Motor - Cambio de aceite")).await);
        let second = state
            .try_create_maintenance(request(1, "Frenos - Pastillas"))
            .await
            .expect("Failed to create maintenance");

        assert_eq!(state.maintenance().len(), 2);
        assert_eq!(state.maintenance()[0], second);
        assert_eq!(state.maintenance()[1].service_type, "Motor - Cambio de aceite");
    }

    #[tokio::test]
    async fn test_failure_leaves_mirror_unchanged() {
        let store = FakeStore::new();
        let mut state = logged_in_state(&store).await;
        assert!(state.create_maintenance(request(1, "Motor - Cambio de aceite")).await);
        let before = state.maintenance().to_vec();

        store.set_failing(true);
        assert!(!state.create_maintenance(request(1, "Frenos - Pastillas")).await);
        assert!(!state.update_maintenance(before[0].id, request(1, "Frenos - Discos")).await);
        assert!(!state.delete_maintenance(before[0].id).await);
        assert_eq!(state.maintenance(), before.as_slice());
    }

    #[tokio::test]
    async fn test_load_update_delete() {
        let store = FakeStore::new();
        let mut state = logged_in_state(&store).await;
        assert!(state.create_maintenance(request(1, "Motor - Cambio de aceite")).await);
        assert!(state.create_maintenance(request(2, "Neumáticos - Rotación")).await);

        assert!(state.load_maintenance(1).await);
        assert_eq!(state.maintenance().len(), 1);
        let id = state.maintenance()[0].id;

        let mut changed = request(1, "Motor - Cambio de aceite");
        changed.cost = Some(52000);
        assert!(state.update_maintenance(id, changed).await);
        assert_eq!(state.maintenance()[0].cost, Some(52000));

        assert!(state.delete_maintenance(id).await);
        assert!(state.maintenance().is_empty());
    }
}
