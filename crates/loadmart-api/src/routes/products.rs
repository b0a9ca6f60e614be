//! Routes for the Catalog bounded context.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get};
use loadmart_catalog::application::query_handlers::{self, ProductView, SearchResults};
use loadmart_catalog::domain::product::ProductId;
use loadmart_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::{Span, field, instrument};

use crate::error::ApiError;
use crate::latency::Endpoint;
use crate::routes::parse_path_id;
use crate::state::AppState;

/// Page size when the client names none.
pub const DEFAULT_PER_PAGE: usize = 20;

/// Largest page a client may ask for.
pub const MAX_PER_PAGE: usize = 100;

/// Search results returned per query.
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Query string for GET /api/products.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    #[serde(default = "first_page")]
    pub page: usize,
    /// Page size, capped at [`MAX_PER_PAGE`].
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

const fn first_page() -> usize {
    1
}

const fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

/// Query string for GET /api/search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive substring over name or category.
    pub q: Option<String>,
    /// Exclude sold-out products; on unless set to `false`.
    #[serde(default = "in_stock_only")]
    pub in_stock_only: bool,
}

const fn in_stock_only() -> bool {
    true
}

/// A page of products.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    /// Products on this page.
    pub products: Vec<ProductView>,
    /// The page number.
    pub page: usize,
    /// The effective page size.
    pub per_page: usize,
    /// Products in the catalog.
    pub total: usize,
}

/// GET /api/products
#[instrument(skip(state, query), fields(page = field::Empty, per_page = field::Empty))]
async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let Query(params) = query?;
    Span::current()
        .record("page", params.page)
        .record("per_page", params.per_page);
    if params.page == 0 || params.per_page == 0 {
        return Err(DomainError::InvalidInput(
            "page and per_page must be at least 1".to_owned(),
        )
        .into());
    }
    state.simulate(Endpoint::ListProducts).await?;

    let per_page = params.per_page.min(MAX_PER_PAGE);
    let offset = (params.page - 1).saturating_mul(per_page);
    let page = query_handlers::list_products(state.shop.catalog(), offset, per_page)?;

    Ok(Json(ProductListResponse {
        products: page.products,
        page: params.page,
        per_page,
        total: page.total,
    }))
}

/// GET /api/products/{id}
#[instrument(skip(state))]
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    let product_id: ProductId = parse_path_id(&id)?;
    state.simulate(Endpoint::ProductDetail).await?;
    let product = query_handlers::get_product(state.shop.catalog(), product_id)?;
    Ok(Json(product))
}

/// GET /api/search
#[instrument(skip(state, query), fields(q = field::Empty))]
async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Query(params) = query?;
    Span::current().record("q", params.q.as_deref().unwrap_or_default());
    state.simulate(Endpoint::Search).await?;
    let results = query_handlers::search_products(
        state.shop.catalog(),
        params.q.as_deref().unwrap_or_default(),
        params.in_stock_only,
        MAX_SEARCH_RESULTS,
    )?;
    Ok(Json(results))
}

/// Returns the router for the catalog context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
}

/// Returns the router for `/api/search`.
pub fn search_router() -> Router<AppState> {
    Router::new().route("/api/search", get(search))
}
