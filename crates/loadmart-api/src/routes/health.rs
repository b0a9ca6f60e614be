//! Health check and service information endpoints.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use loadmart_catalog::domain::catalog::Catalog;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Products in the catalog.
    pub products: usize,
    /// Committed orders.
    pub orders: usize,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
}

/// Endpoint map shown on the index page.
#[derive(Serialize)]
pub struct EndpointMap {
    /// Health check.
    pub health: &'static str,
    /// Product listing.
    pub products: &'static str,
    /// Product detail.
    pub product_detail: &'static str,
    /// Product search.
    pub search: &'static str,
    /// Login.
    pub login: &'static str,
    /// Cart.
    pub cart: &'static str,
    /// Checkout.
    pub checkout: &'static str,
    /// Monitoring counters.
    pub stats: &'static str,
    /// Live dashboard.
    pub dashboard: &'static str,
    /// Reset.
    pub reset: &'static str,
}

/// Headline numbers shown on the index page.
#[derive(Serialize)]
pub struct HeadlineStats {
    /// Products in the catalog.
    pub total_products: usize,
    /// Products with any stock left.
    pub in_stock: usize,
    /// Products with none.
    pub out_of_stock: usize,
    /// Committed orders.
    pub total_orders: usize,
    /// Live sessions.
    pub active_users: usize,
    /// Carts with at least one line.
    pub active_carts: usize,
}

/// Index page response.
#[derive(Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub message: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Service status.
    pub status: &'static str,
    /// What the service is for.
    pub description: &'static str,
    /// Where everything lives.
    pub endpoints: EndpointMap,
    /// Headline numbers.
    pub statistics: HeadlineStats,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let products = state.shop.catalog().read(Catalog::len)?;
    Ok(Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        products,
        orders: state.shop.orders().len()?,
        timestamp: state.shop.clock().now(),
    }))
}

/// GET /
async fn service_info(State(state): State<AppState>) -> Result<Json<ServiceInfo>, ApiError> {
    let stock = state.shop.catalog().read(Catalog::stock_summary)?;
    Ok(Json(ServiceInfo {
        message: "Loadmart load-testing storefront",
        version: env!("CARGO_PKG_VERSION"),
        status: "online",
        description: "In-memory e-commerce API for performance testing",
        endpoints: EndpointMap {
            health: "/health",
            products: "/api/products",
            product_detail: "/api/products/{id}",
            search: "/api/search?q={query}",
            login: "/api/auth/login (POST)",
            cart: "/api/cart (GET), /api/cart/add (POST)",
            checkout: "/api/checkout (POST)",
            stats: "/api/stats",
            dashboard: "/dashboard",
            reset: "/api/admin/reset (POST)",
        },
        statistics: HeadlineStats {
            total_products: stock.total,
            in_stock: stock.total - stock.out_of_stock,
            out_of_stock: stock.out_of_stock,
            total_orders: state.shop.orders().len()?,
            active_users: state.shop.sessions().len(),
            active_carts: state.shop.carts().active_carts(),
        },
    }))
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
}
