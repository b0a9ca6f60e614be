//! Monitoring routes.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use loadmart_checkout::application::query_handlers::{self, Dashboard, StoreStats};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/stats
async fn stats(State(state): State<AppState>) -> Result<Json<StoreStats>, ApiError> {
    Ok(Json(query_handlers::store_stats(&state.shop)?))
}

/// GET /dashboard
async fn dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, ApiError> {
    Ok(Json(query_handlers::dashboard(&state.shop)?))
}

/// Returns the monitoring router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stats", get(stats))
        .route("/dashboard", get(dashboard))
}
