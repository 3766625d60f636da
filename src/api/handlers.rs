//! API Handlers
//!
//! HTTP request handlers for each registration endpoint. They only translate
//! between HTTP and the [`RegistrationCoordinator`].

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::error::Result;
use crate::models::{HealthResponse, RegisterResponse, RegistrationRequest, StatsResponse, UserSummary};
use crate::registry::RegistrationCoordinator;
use crate::store::UserStore;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The one coordinator owning the cache and the store handle
    pub coordinator: Arc<RegistrationCoordinator>,
}

impl AppState {
    /// Creates a new AppState around an existing coordinator.
    pub fn new(coordinator: RegistrationCoordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
        }
    }

    /// Creates a new AppState with a fresh coordinator over `store`.
    pub fn from_store(store: Arc<dyn UserStore>) -> Self {
        Self::new(RegistrationCoordinator::new(store))
    }
}

/// Handler for POST /register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<Json<RegisterResponse>> {
    let user = state.coordinator.register(req).await?;
    Ok(Json(RegisterResponse::new(user)))
}

/// Handler for GET /users
pub async fn list_users_handler(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>> {
    let users = state.coordinator.list_users().await?;
    Ok(Json(users))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.coordinator.cache_stats().await;
    Json(StatsResponse::new(stats.hits, stats.misses, stats.total_entries))
}

/// Handler for GET /health
///
/// Reports 503 when the store cannot be reached.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.coordinator.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::unhealthy()))
        }
    }
}
