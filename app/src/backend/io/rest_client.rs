//! Client for the remote vehicle-management REST API.
//!
//! Bodies are JSON with camelCase fields. The token returned by login or
//! register is attached as a bearer header to every later request until
//! the session ends.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    AuthResponse, ExpenseRecord, ExpenseRequest, LoginRequest, MaintenanceRecord, MaintenanceRequest,
    RegisterRequest, Vehicle, VehicleRequest,
};
use tracing::{debug, warn};

use crate::backend::error::{StoreError, StoreResult};
use crate::backend::storage::traits::{AuthStorage, ExpenseStorage, MaintenanceStorage, VehicleStorage};

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> StoreResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut slot) => *slot = token,
            Err(_) => warn!("Session token lock poisoned, token not updated"),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Non-2xx responses become `StoreError::Status` carrying the body text
    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Remote API rejected the session: {}", message);
        }
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> StoreResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> StoreResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, path: &str) -> StoreResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn open_session(&self, path: &str, body: &(impl Serialize + Sync)) -> StoreResult<AuthResponse> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(StoreError::InvalidCredentials);
        }
        if status == StatusCode::CONFLICT {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Conflict(message));
        }

        let auth: AuthResponse = Self::check(response).await?.json().await?;
        self.set_token(Some(auth.token.clone()));
        Ok(auth)
    }
}

#[async_trait]
impl AuthStorage for ApiClient {
    async fn login(&self, request: &LoginRequest) -> StoreResult<AuthResponse> {
        self.open_session("auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> StoreResult<AuthResponse> {
        self.open_session("auth/register", request).await
    }

    fn end_session(&self) {
        self.set_token(None);
    }
}

#[async_trait]
impl VehicleStorage for ApiClient {
    async fn list_vehicles(&self, user_id: i64) -> StoreResult<Vec<Vehicle>> {
        self.get_json(&format!("vehicles/user/{}", user_id)).await
    }

    async fn create_vehicle(&self, request: &VehicleRequest) -> StoreResult<Vehicle> {
        self.send_json(Method::POST, "vehicles", request).await
    }

    async fn update_vehicle(&self, id: i64, request: &VehicleRequest) -> StoreResult<Vehicle> {
        self.send_json(Method::PUT, &format!("vehicles/{}", id), request).await
    }

    async fn delete_vehicle(&self, id: i64) -> StoreResult<()> {
        self.delete(&format!("vehicles/{}", id)).await
    }
}

#[async_trait]
impl MaintenanceStorage for ApiClient {
    async fn list_maintenance(&self, vehicle_id: i64) -> StoreResult<Vec<MaintenanceRecord>> {
        self.get_json(&format!("maintenances/vehicle/{}", vehicle_id)).await
    }

    async fn create_maintenance(&self, request: &MaintenanceRequest) -> StoreResult<MaintenanceRecord> {
        self.send_json(Method::POST, "maintenances", request).await
    }

    async fn update_maintenance(&self, id: i64, request: &MaintenanceRequest) -> StoreResult<MaintenanceRecord> {
        self.send_json(Method::PUT, &format!("maintenances/{}", id), request).await
    }

    async fn delete_maintenance(&self, id: i64) -> StoreResult<()> {
        self.delete(&format!("maintenances/{}", id)).await
    }
}

#[async_trait]
impl ExpenseStorage for ApiClient {
    async fn list_expenses(&self, vehicle_id: i64) -> StoreResult<Vec<ExpenseRecord>> {
        self.get_json(&format!("api/expenses/vehicle/{}", vehicle_id)).await
    }

    async fn create_expense(&self, request: &ExpenseRequest) -> StoreResult<ExpenseRecord> {
        self.send_json(Method::POST, "api/expenses", request).await
    }

    async fn update_expense(&self, id: i64, request: &ExpenseRequest) -> StoreResult<ExpenseRecord> {
        self.send_json(Method::PUT, &format!("api/expenses/{}", id), request).await
    }

    async fn delete_expense(&self, id: i64) -> StoreResult<()> {
        self.delete(&format!("api/expenses/{}", id)).await
    }
}
