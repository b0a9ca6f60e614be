//! Query handlers for the Catalog context.
//!
//! This module contains query handlers that copy products out of the
//! catalog store into read-only view DTOs. Views never alias catalog state;
//! the stock they report is a snapshot that may be stale by the time the
//! caller acts on it.

use loadmart_core::error::DomainError;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::catalog::{Catalog, StockSummary};
use crate::domain::product::{Category, Product, ProductId, StockLevel};
use crate::store::CatalogStore;

/// Read-only view of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductView {
    /// Product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Current stock.
    pub stock: u32,
    /// Stock at creation.
    pub initial_stock: u32,
    /// Category.
    pub category: Category,
    /// Checkouts that reserved this product.
    pub times_purchased: u64,
    /// Whether any stock is left.
    pub available: bool,
    /// Human-readable stock status.
    pub status: &'static str,
    /// Stock bucket.
    pub stock_level: StockLevel,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let level = product.stock_level();
        Self {
            id: product.id(),
            name: product.name().to_owned(),
            price: product.price(),
            stock: product.stock(),
            initial_stock: product.initial_stock(),
            category: product.category(),
            times_purchased: product.purchase_count(),
            available: product.stock() > 0,
            status: level.label(),
            stock_level: level,
        }
    }
}

/// A page of products.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    /// Products on this page, in creation order.
    pub products: Vec<ProductView>,
    /// Index of the first product on the page.
    pub offset: usize,
    /// Maximum page size requested.
    pub limit: usize,
    /// Number of products in the catalog.
    pub total: usize,
}

/// Search results.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    /// The normalized (trimmed, lower-cased) query.
    pub query: String,
    /// Matching products, truncated to the requested maximum.
    pub results: Vec<ProductView>,
    /// Number of matches before truncation.
    pub count: usize,
}

/// Retrieves a single product.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown id.
pub fn get_product(store: &CatalogStore, product_id: ProductId) -> Result<ProductView, DomainError> {
    store.read(|catalog| catalog.get(product_id).map(ProductView::from))?
}

/// Lists a page of products.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for a zero `limit`.
pub fn list_products(
    store: &CatalogStore,
    offset: usize,
    limit: usize,
) -> Result<ProductPage, DomainError> {
    if limit == 0 {
        return Err(DomainError::InvalidInput(
            "page size must be at least 1".to_owned(),
        ));
    }
    store.read(|catalog| ProductPage {
        products: catalog
            .list(offset, limit)
            .iter()
            .map(ProductView::from)
            .collect(),
        offset,
        limit,
        total: catalog.len(),
    })
}

/// Searches product names and categories.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for a blank query.
pub fn search_products(
    store: &CatalogStore,
    query: &str,
    in_stock_only: bool,
    max_results: usize,
) -> Result<SearchResults, DomainError> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Err(DomainError::InvalidInput(
            "no search query provided".to_owned(),
        ));
    }
    store.read(|catalog| {
        let matches = catalog.search(&query, in_stock_only);
        SearchResults {
            count: matches.len(),
            results: matches
                .into_iter()
                .take(max_results)
                .map(ProductView::from)
                .collect(),
            query,
        }
    })
}

/// Product counts per stock bucket.
///
/// # Errors
///
/// Returns `DomainError::Internal` if the store lock is poisoned.
pub fn stock_summary(store: &CatalogStore) -> Result<StockSummary, DomainError> {
    store.read(Catalog::stock_summary)
}
