//! Routes for the Checkout bounded context.

use axum::body::Bytes;
use axum::extract::State;
use axum::{Json, Router, routing::post};
use loadmart_checkout::application::command_handlers::{self, CheckoutReceipt};
use loadmart_checkout::domain::commands::{
    self, DEFAULT_PAYMENT_METHOD, DEFAULT_SHIPPING_ADDRESS,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::SessionToken;
use crate::error::ApiError;
use crate::routes::json_or_default;
use crate::state::AppState;

/// Request body for POST /api/checkout. The body itself is optional.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    /// Payment method label; `credit_card` when absent.
    pub payment_method: Option<String>,
    /// Shipping address; `Not provided` when absent.
    pub shipping_address: Option<String>,
}

/// Response body for a placed order.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Always `true`.
    pub success: bool,
    /// The order.
    #[serde(flatten)]
    pub receipt: CheckoutReceipt,
    /// Human-readable confirmation.
    pub message: &'static str,
}

/// POST /api/checkout
///
/// Simulated checkout latency is spent inside the payment gateway, after the
/// stock has been reserved.
#[instrument(skip(state, token, body))]
async fn checkout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    body: Bytes,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let request: CheckoutRequest = json_or_default(&body)?;

    let command = commands::Checkout {
        correlation_id: Uuid::new_v4(),
        token,
        payment_method: request
            .payment_method
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_owned()),
        shipping_address: request
            .shipping_address
            .unwrap_or_else(|| DEFAULT_SHIPPING_ADDRESS.to_owned()),
    };

    info!(correlation_id = %command.correlation_id, "handling checkout command");

    let receipt = command_handlers::handle_checkout(&command, &state.shop).await?;

    Ok(Json(CheckoutResponse {
        success: true,
        receipt,
        message: "Order placed successfully!",
    }))
}

/// Returns the router for the checkout context.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(checkout))
}
