//! Store Module
//!
//! Authoritative, uniqueness-enforcing persistence for user records.

mod sqlite;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{UserRecord, UserSummary};

pub use sqlite::SqliteUserStore;

/// Durable user persistence.
///
/// Implementations must enforce email uniqueness themselves: `insert` is
/// never preceded by an existence check.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates the users table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Atomically inserts a new record.
    ///
    /// Fails with [`StoreError::DuplicateKey`] when the email is taken.
    async fn insert(&self, record: &UserRecord) -> Result<(), StoreError>;

    /// Lists every stored user without credentials, in storage order.
    async fn list_all(&self) -> Result<Vec<UserSummary>, StoreError>;

    /// Reads back every full record. Only used to warm the cache.
    async fn load_records(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Checks that the store can be reached.
    async fn health_check(&self) -> Result<(), StoreError>;
}
