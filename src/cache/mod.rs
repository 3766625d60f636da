//! Cache Module
//!
//! In-memory, non-authoritative view of registered users keyed by email.
//! Owned by the registration coordinator and only touched under its lock.

mod stats;
mod user_cache;

pub use stats::CacheStats;
pub use user_cache::UserCache;
