//! Domain records and request/response models for the registration API
//!
//! This module defines the user records shared by the store and the cache,
//! plus the DTOs (Data Transfer Objects) used for HTTP bodies.

pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use requests::RegistrationRequest;
pub use responses::{ErrorResponse, HealthResponse, RegisterResponse, StatsResponse};
pub use user::{UserRecord, UserSummary, MINIMUM_AGE};
