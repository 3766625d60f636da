//! Response DTOs for the registration API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::models::user::UserSummary;

/// Response body for a successful registration (POST /register)
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    /// Success message
    pub message: String,
    /// The registered user, without credentials
    pub user: UserSummary,
}

impl RegisterResponse {
    /// Creates a new RegisterResponse
    pub fn new(user: UserSummary) -> Self {
        Self {
            message: "User registered".to_string(),
            user,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Duplicates caught by the cache
    pub hits: u64,
    /// Cache lookups that found nothing
    pub misses: u64,
    /// Current number of cached users
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(hits: u64, misses: u64, total_entries: usize) -> Self {
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            total_entries,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("healthy" or "unhealthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self::with_status("healthy")
    }

    /// Health response for a server whose store cannot be reached
    pub fn unhealthy() -> Self {
        Self::with_status("unhealthy")
    }

    fn with_status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Stable machine-readable error code
    pub code: &'static str,
    /// Already registered user, when the cache knew about it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<UserSummary>,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            existing: None,
        }
    }

    /// Attaches the already registered user
    pub fn with_existing(mut self, existing: Option<UserSummary>) -> Self {
        self.existing = existing;
        self
    }
}
