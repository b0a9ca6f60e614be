//! Routes for the Cart bounded context.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use loadmart_cart::application::command_handlers;
use loadmart_cart::application::query_handlers::{self, CartView};
use loadmart_cart::domain::commands;
use loadmart_catalog::domain::product::ProductId;
use loadmart_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::{Span, field, info, instrument};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::latency::Endpoint;
use crate::routes::json_or_default;
use crate::state::AppState;

/// Request body for POST /add.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartRequest {
    /// The product to add; required.
    pub product_id: Option<ProductId>,
    /// Units to add; one when absent.
    pub quantity: Option<u32>,
}

/// Response body returned after an item is added.
#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// Distinct products now in the cart.
    pub cart_items: usize,
}

/// GET /
#[instrument(skip(state, user), fields(username = %user.username))]
async fn view_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<CartView>, ApiError> {
    state.simulate(Endpoint::ViewCart).await?;
    Ok(Json(query_handlers::view_cart(
        &user.username,
        state.shop.carts(),
    )))
}

/// POST /add
#[instrument(
    skip(state, user, body),
    fields(username = %user.username, product_id = field::Empty)
)]
async fn add_to_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    body: Bytes,
) -> Result<(StatusCode, Json<AddToCartResponse>), ApiError> {
    let request: AddToCartRequest = json_or_default(&body)?;
    let product_id = request
        .product_id
        .ok_or_else(|| DomainError::InvalidInput("product_id is required".to_owned()))?;
    Span::current().record("product_id", product_id);
    state.simulate(Endpoint::AddToCart).await?;

    let command = commands::AddItem {
        correlation_id: Uuid::new_v4(),
        username: user.username,
        product_id,
        quantity: request.quantity.unwrap_or(1),
    };

    info!(correlation_id = %command.correlation_id, "handling add_item command");

    let result =
        command_handlers::handle_add_item(&command, state.shop.catalog(), state.shop.carts())?;

    Ok((
        StatusCode::CREATED,
        Json(AddToCartResponse {
            message: "Item added to cart",
            cart_items: result.cart_items,
        }),
    ))
}

/// Returns the router for the cart context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart))
        .route("/add", post(add_to_cart))
}
