//! User Cache
//!
//! Fast-path duplicate check in front of the user store.

use std::collections::HashMap;

use crate::cache::CacheStats;
use crate::models::UserRecord;

// == User Cache ==
/// Maps email to the last successfully persisted record for it.
///
/// Entries are only ever added after the store accepted the same record,
/// so the cache can lag the store but never run ahead of it.
#[derive(Debug, Default)]
pub struct UserCache {
    entries: HashMap<String, UserRecord>,
    stats: CacheStats,
}

impl UserCache {
    pub fn new() -> Self {
        Self::default()
    }

    // == Lookup ==
    /// Returns the cached record for `email`, counting the hit or miss.
    pub fn lookup(&mut self, email: &str) -> Option<&UserRecord> {
        let found = self.entries.get(email);
        self.stats.record_lookup(found.is_some());
        found
    }

    // == Insert ==
    /// Caches a record the store has just accepted, replacing any older copy.
    pub fn insert(&mut self, record: UserRecord) {
        self.entries.insert(record.email.clone(), record);
    }

    // == Warm ==
    /// Bulk-loads records read back from the store.
    ///
    /// Returns how many records were loaded.
    pub fn warm<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = UserRecord>,
    {
        let before = self.entries.len();
        let mut loaded = 0;
        for record in records {
            self.insert(record);
            loaded += 1;
        }
        self.stats.record_warmed(loaded);
        tracing::debug!(
            loaded,
            new_entries = self.entries.len() - before,
            "Cache warmed"
        );
        loaded
    }

    /// Looks up without touching the counters.
    pub fn peek(&self, email: &str) -> Option<&UserRecord> {
        self.entries.get(email)
    }

    /// Iterates over every cached record.
    pub fn records(&self) -> impl Iterator<Item = &UserRecord> {
        self.entries.values()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
