//! Registration Coordinator
//!
//! Owns the user cache and a handle to the store, and is the only path
//! through which either is written.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, UserCache};
use crate::error::{RegistrationError, Result, StoreError};
use crate::models::{RegistrationRequest, UserSummary};
use crate::store::UserStore;

/// Steps a single registration moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    Received,
    Validated,
    CacheChecked,
    Persisted,
    CacheUpdated,
    Completed,
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistrationStage::Received => "received",
            RegistrationStage::Validated => "validated",
            RegistrationStage::CacheChecked => "cache_checked",
            RegistrationStage::Persisted => "persisted",
            RegistrationStage::CacheUpdated => "cache_updated",
            RegistrationStage::Completed => "completed",
        };
        f.write_str(name)
    }
}

// == Registration Coordinator ==
/// Validates registrations and writes them through the cache to the store.
///
/// A single `RwLock` guards the cache. `register` holds the write guard from
/// the cache lookup until the cache update, across the store write, so two
/// requests for the same email can never both miss the cache and both insert.
/// Reads take the shared guard and therefore never observe a registration
/// halfway through.
pub struct RegistrationCoordinator {
    store: Arc<dyn UserStore>,
    cache: RwLock<UserCache>,
}

impl RegistrationCoordinator {
    /// Creates a coordinator with an empty cache.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(UserCache::new()),
        }
    }

    // == Register ==
    /// Registers a new user and returns its public summary.
    ///
    /// # Errors
    /// - `InvalidInput` when the request fails validation
    /// - `AlreadyRegistered` when the email is known to the cache or the store
    /// - `PersistenceError` when the store write fails
    pub async fn register(&self, request: RegistrationRequest) -> Result<UserSummary> {
        let email = request.email.clone();
        trace_stage(&email, RegistrationStage::Received);

        if let Some(reason) = request.validate() {
            info!(email = %email, reason = %reason, "Registration rejected");
            return Err(RegistrationError::InvalidInput(reason));
        }
        trace_stage(&email, RegistrationStage::Validated);

        let mut cache = self.cache.write().await;

        if let Some(existing) = cache.lookup(&email) {
            info!(email = %email, "Registration rejected: email cached as registered");
            return Err(RegistrationError::AlreadyRegistered {
                email,
                existing: Some(existing.summary()),
            });
        }
        trace_stage(&email, RegistrationStage::CacheChecked);

        let record = request.into_record();
        match self.store.insert(&record).await {
            Ok(()) => trace_stage(&email, RegistrationStage::Persisted),
            Err(StoreError::DuplicateKey(_)) => {
                info!(email = %email, "Registration rejected: email already in store");
                return Err(RegistrationError::AlreadyRegistered {
                    email,
                    existing: None,
                });
            }
            Err(StoreError::StorageUnavailable(reason)) => {
                warn!(email = %email, error = %reason, "Registration failed");
                return Err(RegistrationError::PersistenceError(reason));
            }
        }

        let summary = record.summary();
        cache.insert(record);
        trace_stage(&email, RegistrationStage::CacheUpdated);
        drop(cache);

        trace_stage(&email, RegistrationStage::Completed);
        info!(email = %email, "User registered");
        Ok(summary)
    }

    // == List Users ==
    /// Lists every registered user straight from the store.
    ///
    /// Store failures are returned as `StorageUnavailable`, never as an
    /// empty list.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let _guard = self.cache.read().await;
        self.store.list_all().await.map_err(|e| {
            warn!(error = %e, "Listing users failed");
            RegistrationError::StorageUnavailable(store_reason(e))
        })
    }

    // == Warm Cache ==
    /// Loads every stored user into the cache.
    ///
    /// Returns the number of records loaded.
    pub async fn warm_cache(&self) -> Result<usize> {
        let mut cache = self.cache.write().await;
        let records = self
            .store
            .load_records()
            .await
            .map_err(|e| RegistrationError::StorageUnavailable(store_reason(e)))?;
        let loaded = cache.warm(records);
        info!("Cache warmed with {} users", loaded);
        Ok(loaded)
    }

    /// Snapshot of the cache counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Checks that the store is reachable.
    pub async fn health_check(&self) -> Result<()> {
        self.store
            .health_check()
            .await
            .map_err(|e| RegistrationError::StorageUnavailable(store_reason(e)))
    }

    /// Emails whose cached record differs from (or is missing in) the store.
    ///
    /// Empty whenever the cache is consistent with the store.
    pub async fn inconsistent_entries(&self) -> Result<Vec<String>> {
        let cache = self.cache.read().await;
        let stored = self
            .store
            .load_records()
            .await
            .map_err(|e| RegistrationError::StorageUnavailable(store_reason(e)))?;

        let mut mismatched: Vec<String> = cache
            .records()
            .filter(|cached| !stored.iter().any(|r| r == *cached))
            .map(|cached| cached.email.clone())
            .collect();
        mismatched.sort();
        Ok(mismatched)
    }
}

impl fmt::Debug for RegistrationCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationCoordinator").finish_non_exhaustive()
    }
}

fn trace_stage(email: &str, stage: RegistrationStage) {
    debug!(email = %email, stage = %stage, "Registration stage");
}

fn store_reason(err: StoreError) -> String {
    match err {
        StoreError::StorageUnavailable(reason) => reason,
        other => other.to_string(),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::models::UserRecord;
    use crate::store::SqliteUserStore;

    async fn sqlite_store() -> Arc<SqliteUserStore> {
        let store = SqliteUserStore::in_memory().await.unwrap();
        store.ensure_schema().await.unwrap();
        Arc::new(store)
    }

    async fn coordinator() -> (RegistrationCoordinator, Arc<SqliteUserStore>) {
        let store = sqlite_store().await;
        (RegistrationCoordinator::new(store.clone()), store)
    }

    fn request(email: &str, name: &str, age: i64) -> RegistrationRequest {
        RegistrationRequest {
            email: email.to_string(),
            password: "p".to_string(),
            name: name.to_string(),
            age,
        }
    }

    /// Store whose every operation fails as if the database were gone.
    struct UnavailableStore;

    #[async_trait]
    impl UserStore for UnavailableStore {
        async fn ensure_schema(&self) -> std::result::Result<(), StoreError> {
            Err(StoreError::StorageUnavailable("disk on fire".into()))
        }
        async fn insert(&self, _: &UserRecord) -> std::result::Result<(), StoreError> {
            Err(StoreError::StorageUnavailable("disk on fire".into()))
        }
        async fn list_all(&self) -> std::result::Result<Vec<UserSummary>, StoreError> {
            Err(StoreError::StorageUnavailable("disk on fire".into()))
        }
        async fn load_records(&self) -> std::result::Result<Vec<UserRecord>, StoreError> {
            Err(StoreError::StorageUnavailable("disk on fire".into()))
        }
        async fn health_check(&self) -> std::result::Result<(), StoreError> {
            Err(StoreError::StorageUnavailable("disk on fire".into()))
        }
    }

    #[tokio::test]
    async fn test_register_then_duplicate_then_list() {
        let (coordinator, _) = coordinator().await;

        let summary = coordinator.register(request("a@x.com", "Ann", 30)).await.unwrap();
        assert_eq!(
            summary,
            UserSummary {
                email: "a@x.com".into(),
                name: "Ann".into(),
                age: 30
            }
        );

        let err = coordinator.register(request("a@x.com", "Ann", 30)).await.unwrap_err();
        assert_eq!(
            err,
            RegistrationError::AlreadyRegistered {
                email: "a@x.com".into(),
                existing: Some(summary.clone()),
            }
        );

        assert_eq!(coordinator.list_users().await.unwrap(), vec![summary]);
    }

    #[tokio::test]
    async fn test_underage_is_rejected_and_not_persisted() {
        let (coordinator, store) = coordinator().await;

        let err = coordinator.register(request("b@x.com", "Bo", 16)).await.unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidInput(_)));

        assert!(coordinator.list_users().await.unwrap().is_empty());
        assert!(store.load_records().await.unwrap().is_empty());
        // rejected before the cache was consulted
        assert_eq!(coordinator.cache_stats().await.misses, 0);
    }

    #[tokio::test]
    async fn test_empty_fields_are_rejected() {
        let (coordinator, _) = coordinator().await;

        for req in [request("", "Ann", 30), request("a@x.com", " ", 30)] {
            let err = coordinator.register(req).await.unwrap_err();
            assert_eq!(err.code(), "invalid_input");
        }
        assert!(coordinator.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cold_cache_duplicate_is_caught_by_store() {
        let store = sqlite_store().await;
        let first = RegistrationCoordinator::new(store.clone());
        first.register(request("a@x.com", "Ann", 30)).await.unwrap();

        // simulates a restart: same store, empty cache
        let restarted = RegistrationCoordinator::new(store.clone());
        let err = restarted.register(request("a@x.com", "Imposter", 40)).await.unwrap_err();
        assert_eq!(
            err,
            RegistrationError::AlreadyRegistered {
                email: "a@x.com".into(),
                existing: None,
            }
        );

        let records = store.load_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ann");
        assert_eq!(restarted.cache_stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_warm_cache_restores_fast_path() {
        let store = sqlite_store().await;
        RegistrationCoordinator::new(store.clone())
            .register(request("a@x.com", "Ann", 30))
            .await
            .unwrap();

        let restarted = RegistrationCoordinator::new(store);
        assert_eq!(restarted.warm_cache().await.unwrap(), 1);

        let err = restarted.register(request("a@x.com", "Ann", 30)).await.unwrap_err();
        match err {
            RegistrationError::AlreadyRegistered { existing, .. } => {
                assert_eq!(existing.unwrap().name, "Ann");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(restarted.cache_stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_and_leaves_cache_untouched() {
        let coordinator = RegistrationCoordinator::new(Arc::new(UnavailableStore));

        let err = coordinator.register(request("a@x.com", "Ann", 30)).await.unwrap_err();
        assert_eq!(err, RegistrationError::PersistenceError("disk on fire".into()));
        assert_eq!(coordinator.cache_stats().await.total_entries, 0);

        let err = coordinator.list_users().await.unwrap_err();
        assert_eq!(err, RegistrationError::StorageUnavailable("disk on fire".into()));

        assert!(coordinator.warm_cache().await.is_err());
        assert!(coordinator.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_cache_matches_store_after_registrations() {
        let (coordinator, _) = coordinator().await;
        for (i, name) in ["Ann", "Bo", "Cy"].iter().enumerate() {
            let email = format!("user{i}@x.com");
            coordinator.register(request(&email, name, 20 + i as i64)).await.unwrap();
        }
        let _ = coordinator.register(request("user0@x.com", "Dup", 50)).await;

        assert_eq!(coordinator.cache_stats().await.total_entries, 3);
        assert!(coordinator.inconsistent_entries().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_email_registers_once() {
        const N: usize = 16;
        let (coordinator, store) = coordinator().await;
        let coordinator = Arc::new(coordinator);

        let handles: Vec<_> = (0..N)
            .map(|i| {
                let coordinator = coordinator.clone();
                tokio::spawn(async move {
                    coordinator
                        .register(request("same@x.com", &format!("User {i}"), 30))
                        .await
                })
            })
            .collect();

        let mut completed = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => completed += 1,
                Err(RegistrationError::AlreadyRegistered { .. }) => rejected += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(completed, 1);
        assert_eq!(rejected, N - 1);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
        // every loser was turned away by the cache, not the constraint
        assert_eq!(coordinator.cache_stats().await.hits, (N - 1) as u64);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(RegistrationStage::CacheChecked.to_string(), "cache_checked");
        assert_eq!(RegistrationStage::Completed.to_string(), "completed");
    }
}
