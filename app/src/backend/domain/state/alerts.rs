use shared::{NewAlert, Vehicle};
use tracing::{info, warn};

use super::{report, AppState};
use crate::backend::domain::alerts::evaluate_vehicle;
use crate::backend::domain::dates::format_display_date;
use crate::backend::error::StateError;

impl AppState {
    /// Evaluate a vehicle's expiration dates, persist each triggered alert
    /// and reload the alert mirror. Returns how many alerts were stored.
    ///
    /// With deduplication on, the mirror is reloaded first and alerts whose
    /// key is already present are skipped, so repeated loads are idempotent.
    pub async fn try_refresh_alerts_for(&mut self, vehicle: &Vehicle) -> Result<usize, StateError> {
        let candidates = evaluate_vehicle(vehicle, self.clock.now(), &self.alert_policy);
        if candidates.is_empty() {
            return Ok(0);
        }

        let fresh: Vec<NewAlert> = if self.alert_policy.deduplicate {
            self.try_load_alerts().await?;
            candidates
                .into_iter()
                .filter(|alert| match &alert.key {
                    Some(key) => !self.alerts.iter().any(|a| a.key.as_ref() == Some(key)),
                    None => true,
                })
                .collect()
        } else {
            candidates
        };
        if fresh.is_empty() {
            return Ok(0);
        }

        for (stored, alert) in fresh.iter().enumerate() {
            if let Err(e) = self.collaborators.alerts.store_alert(alert).await {
                warn!(
                    "Stored {} of {} alerts for vehicle {} before a write failed",
                    stored,
                    fresh.len(),
                    vehicle.plate
                );
                if stored > 0 {
                    if let Err(reload) = self.try_load_alerts().await {
                        warn!(error = %reload, "Could not reload alerts after a partial write");
                    }
                }
                return Err(e.into());
            }
        }
        info!("Stored {} alerts for vehicle {}", fresh.len(), vehicle.plate);

        self.try_load_alerts().await?;
        Ok(fresh.len())
    }

    pub async fn refresh_alerts_for(&mut self, vehicle: &Vehicle) -> bool {
        let result = self.try_refresh_alerts_for(vehicle).await;
        report("refresh_alerts_for", result)
    }

    pub async fn try_load_alerts(&mut self) -> Result<usize, StateError> {
        let alerts = self.collaborators.alerts.list_alerts().await?;

        self.alerts.clear();
        self.alerts.extend(alerts);
        Ok(self.alerts.len())
    }

    pub async fn load_alerts(&mut self) -> bool {
        let result = self.try_load_alerts().await;
        report("load_alerts", result)
    }

    /// Store a hand-written alert dated today and put it at the top of the list
    pub async fn try_add_alert(&mut self, title: &str, message: &str) -> Result<(), StateError> {
        let alert = NewAlert {
            title: title.trim().to_string(),
            message: message.trim().to_string(),
            date: format_display_date(self.clock.today()),
            key: None,
        };
        let stored = self.collaborators.alerts.store_alert(&alert).await?;

        info!("Added alert {} ({})", stored.id, stored.title);
        self.alerts.insert(0, stored);
        Ok(())
    }

    pub async fn add_alert(&mut self, title: &str, message: &str) -> bool {
        let result = self.try_add_alert(title, message).await;
        report("add_alert", result)
    }

    pub async fn try_remove_alert(&mut self, id: i64) -> Result<(), StateError> {
        self.collaborators.alerts.delete_alert(id).await?;
        self.alerts.retain(|a| a.id != id);
        Ok(())
    }

    pub async fn remove_alert(&mut self, id: i64) -> bool {
        let result = self.try_remove_alert(id).await;
        report("remove_alert", result)
    }
}
