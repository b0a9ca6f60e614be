//! Loadmart — API error types.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use loadmart_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The initial shop could not be built.
    #[error("startup error: {0}")]
    Startup(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Product that ran short, for stock errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u32>,
    /// Quantity asked for, for stock errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<u32>,
    /// Stock observed, for stock errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<u32>,
}

impl ErrorBody {
    /// An error body without stock details.
    #[must_use]
    pub fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
            product_id: None,
            requested: None,
            available: None,
        }
    }
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(DomainError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            DomainError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            DomainError::InsufficientStock { .. } => {
                (StatusCode::BAD_REQUEST, "insufficient_stock")
            }
            DomainError::EmptyCart => (StatusCode::BAD_REQUEST, "empty_cart"),
            DomainError::PaymentFailed(_) => (StatusCode::BAD_GATEWAY, "payment_failed"),
            DomainError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let mut body = ErrorBody::new(error_code, self.0.to_string());
        if let DomainError::InsufficientStock {
            product_id,
            requested,
            available,
        } = self.0
        {
            body.product_id = Some(product_id);
            body.requested = Some(requested);
            body.available = Some(available);
        }

        (status, Json(body)).into_response()
    }
}
