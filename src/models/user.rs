//! User records
//!
//! `UserRecord` is the full durable row, credential included. `UserSummary` is
//! the only shape that ever leaves the service.

use serde::Serialize;
use sqlx::FromRow;

/// Youngest age accepted at registration.
pub const MINIMUM_AGE: i64 = 18;

// == User Record ==
/// Full representation of a registered user.
///
/// Emails are kept exactly as submitted and compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub email: String,
    /// Stored as given.
    pub password: String,
    pub name: String,
    pub age: i64,
}

impl UserRecord {
    /// Projects the record onto its public fields.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            email: self.email.clone(),
            name: self.name.clone(),
            age: self.age,
        }
    }
}

// == User Summary ==
/// Public projection of a [`UserRecord`] without credential material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, FromRow)]
pub struct UserSummary {
    pub email: String,
    pub name: String,
    pub age: i64,
}

impl From<&UserRecord> for UserSummary {
    fn from(record: &UserRecord) -> Self {
        record.summary()
    }
}
