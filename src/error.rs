//! Error types for the registration service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{ErrorResponse, UserSummary};

// == Store Error Enum ==
/// Failures reported by a [`UserStore`](crate::store::UserStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The uniqueness constraint on `email` rejected the row
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// I/O, connection or any other storage failure
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateKey(db_err.message().to_string())
            }
            _ => StoreError::StorageUnavailable(err.to_string()),
        }
    }
}

// == Registration Error Enum ==
/// Outcome of a rejected or failed coordinator operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Request failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Email already taken; `existing` is set when the cache knew the user
    #[error("Email already registered: {email}")]
    AlreadyRegistered {
        email: String,
        existing: Option<UserSummary>,
    },

    /// Store write failed during registration
    #[error("Failed to persist user: {0}")]
    PersistenceError(String),

    /// Store read failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl RegistrationError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::InvalidInput(_) => "invalid_input",
            RegistrationError::AlreadyRegistered { .. } => "already_registered",
            RegistrationError::PersistenceError(_) => "persistence_error",
            RegistrationError::StorageUnavailable(_) => "storage_unavailable",
        }
    }

    /// HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            RegistrationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RegistrationError::AlreadyRegistered { .. } => StatusCode::CONFLICT,
            RegistrationError::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistrationError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse::new(self.code(), self.to_string());
        let body = match self {
            RegistrationError::AlreadyRegistered { existing, .. } => body.with_existing(existing),
            _ => body,
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for coordinator operations.
pub type Result<T> = std::result::Result<T, RegistrationError>;
