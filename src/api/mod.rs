//! API Module
//!
//! HTTP handlers and routing for the registration REST API.
//!
//! # Endpoints
//! - `POST /register` - Register a new user
//! - `GET /users` - List registered users
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
