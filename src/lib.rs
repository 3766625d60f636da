//! User Registry - A small user-registration service
//!
//! Registers users through a write-through in-memory cache in front of an
//! SQLite store, and lists them back without credentials.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::{RegistrationError, StoreError};
pub use registry::RegistrationCoordinator;
pub use store::{SqliteUserStore, UserStore};
