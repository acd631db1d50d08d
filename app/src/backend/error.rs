//! # Error Types
//!
//! Typed failures raised below the reconciliation layer. Collaborators (the
//! remote API client and the local store) return [`StoreError`]; the
//! reconciliation layer wraps those in [`StateError`] together with its own
//! preconditions. Legacy callers only ever see a `bool`, but the structured
//! error is always logged before it is reduced.

/// Failure reported by a collaborator
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a reconciliation operation
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("No user is logged in")]
    NotAuthenticated,

    #[error("No vehicle with plate {0} is loaded")]
    UnknownVehicle(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = StoreError::Status {
            status: 404,
            message: "vehicle not found".to_string(),
        };
        assert_eq!(error.to_string(), "Server returned 404: vehicle not found");
    }

    #[test]
    fn test_state_error_is_transparent_over_store_error() {
        let error: StateError = StoreError::InvalidCredentials.into();
        assert_eq!(error.to_string(), "Invalid credentials");
        assert!(matches!(error, StateError::Store(StoreError::InvalidCredentials)));
    }
}
