//! Administrative routes.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use loadmart_checkout::application::command_handlers::{self, ResetSummary};
use loadmart_checkout::domain::commands;
use loadmart_core::error::DomainError;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for a reset.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// Counts of the fresh state.
    #[serde(flatten)]
    pub summary: ResetSummary,
}

/// POST /reset
#[instrument(skip(state))]
async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>, ApiError> {
    let command = commands::ResetStore {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling reset_store command");

    let shop = state.shop.clone();
    let summary = tokio::task::spawn_blocking(move || {
        command_handlers::handle_reset(&command, &shop)
    })
    .await
    .map_err(|e| DomainError::Internal(format!("reset task failed: {e}")))??;

    Ok(Json(ResetResponse {
        message: "Store reset",
        summary,
    }))
}

/// Returns the router for administrative actions.
pub fn router() -> Router<AppState> {
    Router::new().route("/reset", post(reset))
}
