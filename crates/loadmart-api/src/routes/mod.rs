//! Route modules organized by bounded context.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod products;
pub mod stats;
pub mod users;

use std::str::FromStr;

use axum::Router;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use loadmart_core::error::DomainError;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

/// Returns the router serving every endpoint, with a JSON 404 fallback.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(stats::router())
        .nest("/api/auth", auth::router())
        .nest("/api/products", products::router())
        .merge(products::search_router())
        .nest("/api/cart", cart::router())
        .nest("/api/checkout", checkout::router())
        .nest("/api/admin", admin::router())
        .merge(users::router())
        .fallback(not_found)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(
            "not_found",
            "The requested resource was not found",
        )),
    )
}

/// Parses a numeric path segment, rejecting anything else as invalid input.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(DomainError::InvalidInput(format!("invalid id `{raw}`"))))
}

/// Decodes an optional JSON body; an empty body yields the defaults.
pub(crate) fn json_or_default<T>(body: &Bytes) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError(DomainError::InvalidInput(format!("malformed JSON body: {e}"))))
}
