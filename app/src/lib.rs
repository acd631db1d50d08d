//! Vehicle maintenance tracker.
//!
//! Tracks each user's vehicles with their insurance (SOAP), circulation
//! permit and technical inspection expiration dates, plus service and expense
//! records. Data lives either behind a remote REST API or in a local SQLite
//! file; alerts are generated when an expiration date gets close.

pub mod backend;
pub mod logging;

pub use backend::{initialize_backend, AppConfig, AppState, BackendMode};
