//! # Backend Module
//!
//! Everything below the presentation layer.
//!
//! - **domain**: business rules and the reconciliation layer ([`AppState`])
//! - **storage**: collaborator traits and the local SQLite store
//! - **io**: the remote REST API client
//! - **config**: environment-driven startup settings
//! - **error**: typed collaborator and state failures
//!
//! ## Architecture
//!
//! ```text
//! Presentation (UI, CLI driver)
//!     ↓
//! Domain (AppState, alerts, validation)
//!     ↓
//! Collaborators (ApiClient | SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

pub use config::{AppConfig, BackendMode};
pub use domain::AppState;

use crate::backend::io::ApiClient;
use crate::backend::storage::sqlite::{
    AlertRepository, DbConnection, ExpenseRepository, MaintenanceRepository, UserRepository, VehicleRepository,
};
use crate::backend::storage::Collaborators;

/// Open the stores named by `config` and build an anonymous [`AppState`] on top
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Opening local store at {}", config.database_url);
    let db = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open local store {}", config.database_url))?;

    let collaborators = match config.mode {
        BackendMode::Remote => {
            info!("Using remote API at {}", config.api_base_url);
            let api = Arc::new(ApiClient::new(&config.api_base_url).context("Failed to build HTTP client")?);
            Collaborators {
                auth: api.clone(),
                vehicles: api.clone(),
                maintenance: api.clone(),
                expenses: api,
                alerts: Arc::new(AlertRepository::new(db)),
            }
        }
        BackendMode::Local => {
            info!("Using local store for all entities");
            Collaborators {
                auth: Arc::new(UserRepository::new(db.clone())),
                vehicles: Arc::new(VehicleRepository::new(db.clone())),
                maintenance: Arc::new(MaintenanceRepository::new(db.clone())),
                expenses: Arc::new(ExpenseRepository::new(db.clone())),
                alerts: Arc::new(AlertRepository::new(db)),
            }
        }
    };

    Ok(AppState::new(collaborators, config.alert_policy))
}
