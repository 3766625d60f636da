//! SQLite user store backed by an sqlx connection pool.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::{UserRecord, UserSummary};
use crate::store::UserStore;

/// [`UserStore`] over a single `users` table.
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Opens a pool for `url`, creating the database file if needed.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        info!("Connecting to SQLite database at {}", url);

        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                StoreError::from(e)
            })?;

        info!("SQLite connection pool established");
        Ok(Self { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// Every SQLite memory connection is its own database, so the pool is
    /// pinned to one connection that never idles out.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Closes the pool; later calls fail with `StorageUnavailable`.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                name TEXT NOT NULL,
                age INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("Users table ready");
        Ok(())
    }

    async fn insert(&self, record: &UserRecord) -> Result<(), StoreError> {
        debug!("Inserting user: {}", record.email);

        sqlx::query("INSERT INTO users (email, password, name, age) VALUES (?, ?, ?, ?)")
            .bind(&record.email)
            .bind(&record.password)
            .bind(&record.name)
            .bind(record.age)
            .execute(&self.pool)
            .await
            .map_err(|e| match StoreError::from(e) {
                StoreError::DuplicateKey(_) => StoreError::DuplicateKey(record.email.clone()),
                other => other,
            })?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserSummary>, StoreError> {
        let users = sqlx::query_as::<_, UserSummary>("SELECT email, name, age FROM users")
            .fetch_all(&self.pool)
            .await?;

        debug!("Listed {} users", users.len());
        Ok(users)
    }

    async fn load_records(&self) -> Result<Vec<UserRecord>, StoreError> {
        let records =
            sqlx::query_as::<_, UserRecord>("SELECT email, password, name, age FROM users")
                .fetch_all(&self.pool)
                .await?;
        Ok(records)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
