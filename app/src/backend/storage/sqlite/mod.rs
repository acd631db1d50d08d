//! # SQLite Storage Module
//!
//! On-device persistence. In local mode every entity lives here; in remote
//! mode only alerts do.
//!
//! ## Components
//!
//! - **connection.rs** - pool setup and the versioned schema
//! - **user_repository.rs** - accounts with argon2 password hashes
//! - **vehicle_repository.rs**, **maintenance_repository.rs**,
//!   **expense_repository.rs** - per-entity CRUD
//! - **alert_repository.rs** - generated and manual alerts

pub mod alert_repository;
pub mod connection;
pub mod expense_repository;
pub mod maintenance_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use alert_repository::AlertRepository;
pub use connection::DbConnection;
pub use expense_repository::ExpenseRepository;
pub use maintenance_repository::MaintenanceRepository;
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
