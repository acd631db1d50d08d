//! # Reconciliation Layer
//!
//! [`AppState`] is what the presentation layer sees. It owns one in-memory
//! collection per entity and keeps each consistent with its collaborator:
//!
//! 1. the collaborator is called first;
//! 2. only on success is the mirror changed (append, prepend, replace or remove);
//! 3. on failure the mirror is left as it was and the error is returned.
//!
//! Every operation comes in two forms. `try_*` returns the typed
//! [`StateError`]. The plain form logs that error and reduces it to a `bool`
//! for callers that only need "it worked" or "it did not".
//!
//! Operations take `&mut self`, so one owner drives them one at a time.

mod alerts;
mod auth;
mod expenses;
mod maintenance;
mod vehicles;

use std::sync::Arc;

use shared::{AlertRecord, ExpenseRecord, MaintenanceRecord, Vehicle};
use tracing::{error, info};

use crate::backend::domain::alerts::AlertPolicy;
use crate::backend::domain::dates::{Clock, SystemClock};
use crate::backend::domain::session::{AuthState, Session};
use crate::backend::error::StateError;
use crate::backend::storage::traits::Collaborators;

pub struct AppState {
    collaborators: Collaborators,
    clock: Arc<dyn Clock>,
    alert_policy: AlertPolicy,
    auth_state: AuthState,
    session: Session,
    profile_photo: Option<Vec<u8>>,
    vehicles: Vec<Vehicle>,
    maintenance: Vec<MaintenanceRecord>,
    expenses: Vec<ExpenseRecord>,
    alerts: Vec<AlertRecord>,
}

impl AppState {
    pub fn new(collaborators: Collaborators, alert_policy: AlertPolicy) -> Self {
        Self::with_clock(collaborators, alert_policy, Arc::new(SystemClock))
    }

    pub fn with_clock(collaborators: Collaborators, alert_policy: AlertPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            collaborators,
            clock,
            alert_policy,
            auth_state: AuthState::Anonymous,
            session: Session::default(),
            profile_photo: None,
            vehicles: Vec::new(),
            maintenance: Vec::new(),
            expenses: Vec::new(),
            alerts: Vec::new(),
        }
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth_state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth_state == AuthState::Authenticated
    }

    pub fn profile_photo(&self) -> Option<&[u8]> {
        self.profile_photo.as_deref()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn maintenance(&self) -> &[MaintenanceRecord] {
        &self.maintenance
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// Newest first
    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    pub fn alert_policy(&self) -> &AlertPolicy {
        &self.alert_policy
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn vehicle_by_plate(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.plate == plate)
    }

    /// Replace the cached profile picture. Bytes are opaque here.
    pub fn set_profile_photo(&mut self, photo: Option<Vec<u8>>) {
        self.profile_photo = photo;
    }

    /// Back to anonymous: session fields reset, every mirror emptied, photo dropped
    pub fn logout(&mut self) {
        self.collaborators.auth.end_session();

        let email = std::mem::take(&mut self.session).email;
        self.auth_state = AuthState::Anonymous;
        self.profile_photo = None;
        self.vehicles.clear();
        self.maintenance.clear();
        self.expenses.clear();
        self.alerts.clear();

        info!("Logged out {}", email);
    }

    fn require_user(&self) -> Result<i64, StateError> {
        match self.session.user_id {
            Some(id) if self.is_logged_in() => Ok(id),
            _ => Err(StateError::NotAuthenticated),
        }
    }
}

/// Reduce a typed result to the legacy success flag, logging the failure
fn report<T>(operation: &str, result: Result<T, StateError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            error!(operation = %operation, error = %e, "Operation failed");
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::NaiveDate;

    use crate::backend::domain::dates::FixedClock;
    use crate::backend::storage::test_utils::{FakeStore, TEST_EMAIL, TEST_PASSWORD};

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    pub fn state_with(store: &Arc<FakeStore>, policy: AlertPolicy) -> AppState {
        AppState::with_clock(store.collaborators(), policy, Arc::new(FixedClock::at_date(today())))
    }

    pub async fn logged_in_state(store: &Arc<FakeStore>) -> AppState {
        let mut state = state_with(store, AlertPolicy::default());
        assert!(state.login(TEST_EMAIL, TEST_PASSWORD).await);
        state
    }
}
