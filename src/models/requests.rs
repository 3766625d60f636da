//! Request DTOs for the registration API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::models::user::{UserRecord, MINIMUM_AGE};

/// Request body for POST /register
///
/// # Fields
/// - `email`: Unique identity of the user, kept exactly as given
/// - `password`: Opaque credential, stored as given
/// - `name`: Display name
/// - `age`: Age in years, at least [`MINIMUM_AGE`]
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i64,
}

impl RegistrationRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.email.trim().is_empty() {
            return Some("Email cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.age < MINIMUM_AGE {
            return Some(format!(
                "Age must be at least {}, got {}",
                MINIMUM_AGE, self.age
            ));
        }
        None
    }

    /// Consumes the request into the record that will be persisted.
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            email: self.email,
            password: self.password,
            name: self.name,
            age: self.age,
        }
    }
}
