//! # Domain Module
//!
//! Business rules for the vehicle tracker, independent of where data is
//! stored or how it is shown.
//!
//! ## Module Organization
//!
//! - **validation**: login and registration form checks (regex based, ordered rules)
//! - **dates**: accepted date formats, the [`Clock`](dates::Clock) seam and days-until
//! - **alerts**: which expiration dates produce an alert, and the alert text
//! - **catalog**: expense and maintenance categories plus their form checks
//! - **currency**: Chilean peso formatting
//! - **summary**: current-month totals for the home screen
//! - **session**: the logged-in user and the authentication lifecycle
//! - **state**: the reconciliation layer that mirrors the stores in memory
//!
//! ## Core Concepts
//!
//! - **Collaborator**: a remote API or local store implementing the storage traits
//! - **Mirror**: the in-memory copy of stored entities held by [`AppState`]
//! - **Alert key**: `plate:field:date`, the identity of an expiration condition
//!
//! ## Rules
//!
//! - The mirror changes only after a collaborator confirms the write
//! - A failed operation leaves the mirror untouched and is logged
//! - Loads replace a whole collection; they never merge
//! - Text that is not a date never expires

pub mod alerts;
pub mod catalog;
pub mod currency;
pub mod dates;
pub mod session;
pub mod state;
pub mod summary;
pub mod validation;

pub use alerts::{AlertPolicy, ExpiryField};
pub use dates::{Clock, FixedClock, SystemClock};
pub use session::{AuthState, Session};
pub use state::AppState;
