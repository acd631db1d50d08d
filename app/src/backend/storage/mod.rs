//! # Storage Module
//!
//! Everything below the reconciliation layer that persists data.
//!
//! The state layer only sees the traits in [`traits`]. Two families of
//! implementations exist: the REST client in `io::rest_client` for the
//! remote backend, and the SQLite repositories in [`sqlite`] for the
//! on-device store. A [`Collaborators`] bundle picks one implementation per
//! entity type at startup.
//!
//! ## Failure model
//!
//! Every operation returns [`StoreResult`](crate::backend::error::StoreResult).
//! Nothing here retries or caches; the caller decides what a failure means for
//! its in-memory mirror.

pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use sqlite::DbConnection;
pub use traits::{AlertStorage, AuthStorage, Collaborators, ExpenseStorage, MaintenanceStorage, VehicleStorage};
