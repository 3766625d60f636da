//! Cache Statistics Module
//!
//! Counts how often the cache short-circuits a duplicate registration.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of the user cache counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Registrations rejected straight from the cache
    pub hits: u64,
    /// Lookups that found no cached user
    pub misses: u64,
    /// Users loaded from the store by cache warming
    pub warmed: u64,
    /// Current number of cached users
    pub total_entries: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub(crate) fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub(crate) fn record_warmed(&mut self, count: usize) {
        self.warmed += count as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_no_lookups() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_record_lookup() {
        let mut stats = CacheStats::new();
        stats.record_lookup(true);
        stats.record_lookup(false);
        stats.record_lookup(false);
        stats.record_lookup(false);

        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.hit_rate(), 0.25);
    }

    #[test]
    fn test_record_warmed_accumulates() {
        let mut stats = CacheStats::new();
        stats.record_warmed(3);
        stats.record_warmed(2);
        assert_eq!(stats.warmed, 5);
    }
}
