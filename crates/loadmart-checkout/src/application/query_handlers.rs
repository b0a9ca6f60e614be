//! Query handlers for store-wide reporting.
//!
//! Each section of a report is copied out under its own lock, so a report
//! taken during heavy traffic is a set of consistent snapshots rather than
//! one atomic picture.

use loadmart_cart::book::CartSummary;
use loadmart_catalog::application::query_handlers::ProductView;
use loadmart_catalog::domain::catalog::{Catalog, StockSummary};
use loadmart_core::error::DomainError;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::order::Order;
use crate::shop::Shop;

/// Products shown on the dashboard.
pub const DASHBOARD_PRODUCTS: usize = 20;

/// Orders shown on the dashboard.
pub const DASHBOARD_ORDERS: usize = 10;

/// Order totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    /// Number of committed orders.
    pub total: usize,
    /// Sum of their totals.
    pub total_revenue: Decimal,
}

/// User activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    /// Live sessions.
    pub active_sessions: usize,
    /// Carts holding at least one line.
    pub active_carts: usize,
}

/// Stock pre-check outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    /// Cart adds rejected since the last reset.
    pub blocked_attempts: u64,
}

/// Aggregate counters for monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Product counts by stock level.
    pub products: StockSummary,
    /// Order totals.
    pub orders: OrderStats,
    /// User activity.
    pub users: UserStats,
    /// Pre-check outcomes.
    pub validation: ValidationStats,
}

/// A product row on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardProduct {
    /// The product.
    #[serde(flatten)]
    pub product: ProductView,
    /// `stock / initial_stock`, zero when nothing was ever stocked.
    pub stock_ratio: f64,
}

impl From<ProductView> for DashboardProduct {
    fn from(product: ProductView) -> Self {
        let stock_ratio = if product.initial_stock == 0 {
            0.0
        } else {
            f64::from(product.stock) / f64::from(product.initial_stock)
        };
        Self {
            product,
            stock_ratio,
        }
    }
}

/// Everything the live dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Aggregate counters.
    pub stats: StoreStats,
    /// The first products in catalog order.
    pub products: Vec<DashboardProduct>,
    /// Every active cart.
    pub carts: Vec<CartSummary>,
    /// The most recent orders, oldest first.
    pub recent_orders: Vec<Order>,
}

/// Collects the monitoring counters.
///
/// # Errors
///
/// Returns `DomainError::Internal` if a lock is poisoned.
pub fn store_stats(shop: &Shop) -> Result<StoreStats, DomainError> {
    let products = shop.catalog().read(Catalog::stock_summary)?;
    Ok(StoreStats {
        products,
        orders: OrderStats {
            total: shop.orders().len()?,
            total_revenue: shop.orders().revenue()?,
        },
        users: UserStats {
            active_sessions: shop.sessions().len(),
            active_carts: shop.carts().active_carts(),
        },
        validation: ValidationStats {
            blocked_attempts: shop.carts().blocked_attempts(),
        },
    })
}

/// Builds the dashboard view.
///
/// # Errors
///
/// Returns `DomainError::Internal` if a lock is poisoned.
pub fn dashboard(shop: &Shop) -> Result<Dashboard, DomainError> {
    let products = shop.catalog().read(|catalog| {
        catalog
            .list(0, DASHBOARD_PRODUCTS)
            .iter()
            .map(|product| DashboardProduct::from(ProductView::from(product)))
            .collect()
    })?;
    Ok(Dashboard {
        stats: store_stats(shop)?,
        products,
        carts: shop.carts().summaries(),
        recent_orders: shop.orders().recent(DASHBOARD_ORDERS)?,
    })
}
