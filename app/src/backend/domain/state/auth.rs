use shared::{LoginRequest, RegisterRequest};
use tracing::info;

use super::{report, AppState};
use crate::backend::domain::session::{AuthState, Session};
use crate::backend::error::StateError;

impl AppState {
    /// Verify credentials with the auth collaborator and populate the session.
    /// On failure the session and auth state are left as they were before the call.
    pub async fn try_login(&mut self, email: &str, password: &str) -> Result<(), StateError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let previous = self.auth_state;
        self.auth_state = AuthState::Authenticating;
        match self.collaborators.auth.login(&request).await {
            Ok(auth) => {
                self.session = Session::from_auth(auth);
                self.auth_state = AuthState::Authenticated;
                info!("Logged in {} (user {:?})", self.session.email, self.session.user_id);
                Ok(())
            }
            Err(e) => {
                self.auth_state = previous;
                Err(e.into())
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let result = self.try_login(email, password).await;
        report("login", result)
    }

    /// Create the account and start a session for it
    pub async fn try_register(&mut self, request: RegisterRequest) -> Result<(), StateError> {
        let request = RegisterRequest {
            name: request.name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            password: request.password,
        };

        let previous = self.auth_state;
        self.auth_state = AuthState::Authenticating;
        match self.collaborators.auth.register(&request).await {
            Ok(auth) => {
                self.session = Session::from_auth(auth);
                self.auth_state = AuthState::Authenticated;
                info!("Registered {}", self.session.email);
                Ok(())
            }
            Err(e) => {
                self.auth_state = previous;
                Err(e.into())
            }
        }
    }

    pub async fn register(&mut self, request: RegisterRequest) -> bool {
        let result = self.try_register(request).await;
        report("register", result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::backend::domain::alerts::AlertPolicy;
    use crate::backend::domain::session::AuthState;
    use crate::backend::error::{StateError, StoreError};
    use crate::backend::storage::test_utils::{vehicle_request, FakeStore, TEST_EMAIL, TEST_PASSWORD, TEST_USER_ID};
    use shared::RegisterRequest;

    #[tokio::test]
    async fn test_login_populates_session() {
        let store = FakeStore::new();
        let mut state = state_with(&store, AlertPolicy::default());

        assert!(state.login(&format!("  {}  ", TEST_EMAIL), TEST_PASSWORD).await);
        assert_eq!(state.auth_state(), AuthState::Authenticated);
        assert_eq!(state.session().user_id, Some(TEST_USER_ID));
        assert_eq!(state.session().display_name(), "Juan Pérez");
        assert_eq!(state.session().token, "token-123");
    }

    #[tokio::test]
    async fn test_failed_login_returns_to_anonymous() {
        let store = FakeStore::new();
        let mut state = state_with(&store, AlertPolicy::default());

        let result = state.try_login(TEST_EMAIL, "wrong").await;
        assert!(matches!(result, Err(StateError::Store(StoreError::InvalidCredentials))));
        assert_eq!(state.auth_state(), AuthState::Anonymous);
        assert!(!state.is_logged_in());
    }

    #[tokio::test]
    async fn test_failed_relogin_keeps_existing_session() {
        let store = FakeStore::new();
        let mut state = logged_in_state(&store).await;
        let before = state.session().clone();

        assert!(!state.login(TEST_EMAIL, "wrong").await);
        assert_eq!(state.auth_state(), AuthState::Authenticated);
        assert!(state.is_logged_in());
        assert_eq!(state.session(), &before);

        let failed_register = state
            .try_register(RegisterRequest {
                name: "Juan".to_string(),
                last_name: "Pérez".to_string(),
                email: TEST_EMAIL.to_string(),
                password: "password123".to_string(),
                phone: "+56912345678".to_string(),
            })
            .await;
        assert!(failed_register.is_err());
        assert_eq!(state.auth_state(), AuthState::Authenticated);
        assert_eq!(state.session(), &before);
        assert!(state.create_vehicle(vehicle_request("AA-BB-11")).await);
        assert_eq!(state.vehicles()[0].user_id, TEST_USER_ID);
    }

    #[tokio::test]
    async fn test_failed_relogin_after_logout_stays_anonymous() {
        let store = FakeStore::new();
        let mut state = logged_in_state(&store).await;
        state.logout();

        assert!(!state.login(TEST_EMAIL, "wrong").await);
        assert_eq!(state.auth_state(), AuthState::Anonymous);
        assert!(!state.is_logged_in());
        assert!(!state.create_vehicle(vehicle_request("AA-BB-11")).await);
    }

    #[tokio::test]
    async fn test_login_while_store_is_down() {
        let store = FakeStore::new();
        store.set_failing(true);
        let mut state = state_with(&store, AlertPolicy::default());

        assert!(!state.login(TEST_EMAIL, TEST_PASSWORD).await);
        assert_eq!(state.session().user_id, None);
    }

    #[tokio::test]
    async fn test_register_trims_and_logs_in() {
        let store = FakeStore::new();
        let mut state = state_with(&store, AlertPolicy::default());

        let registered = state
            .register(RegisterRequest {
                name: " Ana ".to_string(),
                last_name: "Rojas ".to_string(),
                email: " ana@example.com".to_string(),
                password: "secreto1".to_string(),
                phone: "+56987654321".to_string(),
            })
            .await;

        assert!(registered);
        assert!(state.is_logged_in());
        assert_eq!(state.session().display_name(), "Ana Rojas");
        assert_eq!(state.session().email, "ana@example.com");
    }
}
