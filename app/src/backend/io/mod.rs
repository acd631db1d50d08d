//! # IO Module
//!
//! Talks to the outside world on behalf of the storage traits.
//!
//! The only adapter today is [`rest_client::ApiClient`], which implements the
//! auth, vehicle, maintenance and expense collaborators against the remote
//! JSON API. Status codes map onto [`StoreError`](crate::backend::error::StoreError):
//! 401 on an auth endpoint is `InvalidCredentials`, 409 is `Conflict`, and
//! any other non-2xx response is `Status` with the response body as message.

pub mod rest_client;

pub use rest_client::ApiClient;
