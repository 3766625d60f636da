//! Registration Module
//!
//! Serializes registrations through one lock so the cache check, the store
//! write and the cache update happen as a single step.

mod coordinator;


pub use coordinator::{RegistrationCoordinator, RegistrationStage};
