use shared::{Vehicle, VehicleRequest};
use tracing::{error, info, warn};

use super::{report, AppState};
use crate::backend::error::StateError;

impl AppState {
    /// Replace the vehicle mirror with the logged-in user's vehicles, then
    /// evaluate their expiration dates
    pub async fn try_load_vehicles(&mut self) -> Result<usize, StateError> {
        let user_id = self.require_user()?;
        let vehicles = self.collaborators.vehicles.list_vehicles(user_id).await?;

        self.vehicles.clear();
        self.vehicles.extend(vehicles);
        info!("Loaded {} vehicles for user {}", self.vehicles.len(), user_id);

        let loaded = self.vehicles.clone();
        for vehicle in &loaded {
            self.refresh_alerts_quietly(vehicle).await;
        }
        Ok(loaded.len())
    }

    pub async fn load_vehicles(&mut self) -> bool {
        let result = self.try_load_vehicles().await;
        report("load_vehicles", result)
    }

    /// The vehicle is always owned by the logged-in user, whatever
    /// `request.user_id` says
    pub async fn try_create_vehicle(&mut self, mut request: VehicleRequest) -> Result<Vehicle, StateError> {
        request.user_id = self.require_user()?;
        let vehicle = self.collaborators.vehicles.create_vehicle(&request).await?;

        info!("Created vehicle {} with id {}", vehicle.plate, vehicle.id);
        self.vehicles.push(vehicle.clone());
        self.refresh_alerts_quietly(&vehicle).await;
        Ok(vehicle)
    }

    pub async fn create_vehicle(&mut self, request: VehicleRequest) -> bool {
        let result = self.try_create_vehicle(request).await;
        report("create_vehicle", result)
    }

    pub async fn try_update_vehicle(&mut self, id: i64, mut request: VehicleRequest) -> Result<Vehicle, StateError> {
        request.user_id = self.require_user()?;
        let vehicle = self.collaborators.vehicles.update_vehicle(id, &request).await?;

        match self.vehicles.iter().position(|v| v.id == id) {
            Some(index) => {
                self.vehicles[index] = vehicle.clone();
                info!("Updated vehicle {} with id {}", vehicle.plate, id);
            }
            None => warn!("Updated vehicle {} is not in the mirror, nothing replaced", id),
        }
        self.refresh_alerts_quietly(&vehicle).await;
        Ok(vehicle)
    }

    pub async fn update_vehicle(&mut self, id: i64, request: VehicleRequest) -> bool {
        let result = self.try_update_vehicle(id, request).await;
        report("update_vehicle", result)
    }

    pub async fn try_delete_vehicle(&mut self, id: i64) -> Result<(), StateError> {
        self.collaborators.vehicles.delete_vehicle(id).await?;

        self.vehicles.retain(|v| v.id != id);
        info!("Deleted vehicle {}", id);
        Ok(())
    }

    pub async fn delete_vehicle(&mut self, id: i64) -> bool {
        let result = self.try_delete_vehicle(id).await;
        report("delete_vehicle", result)
    }

    /// Delete using the plate as key. The id comes from the mirror, so the
    /// vehicle must have been loaded first.
    pub async fn try_delete_vehicle_by_plate(&mut self, plate: &str) -> Result<(), StateError> {
        let id = self
            .vehicle_by_plate(plate)
            .map(|v| v.id)
            .ok_or_else(|| StateError::UnknownVehicle(plate.to_string()))?;

        self.collaborators.vehicles.delete_vehicle(id).await?;

        self.vehicles.retain(|v| v.plate != plate);
        info!("Deleted vehicle {} (id {})", plate, id);
        Ok(())
    }

    pub async fn delete_vehicle_by_plate(&mut self, plate: &str) -> bool {
        let result = self.try_delete_vehicle_by_plate(plate).await;
        report("delete_vehicle_by_plate", result)
    }

    /// Alert generation rides along with vehicle writes; its failure does not
    /// undo the write
    async fn refresh_alerts_quietly(&mut self, vehicle: &Vehicle) {
        if let Err(e) = self.try_refresh_alerts_for(vehicle).await {
            error!(plate = %vehicle.plate, error = %e, "Alert refresh failed");
        }
    }
}
