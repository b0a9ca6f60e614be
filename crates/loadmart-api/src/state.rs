//! Shared application state.

use std::sync::Arc;

use loadmart_checkout::shop::Shop;
use loadmart_core::error::DomainError;

use crate::latency::{Endpoint, SimulatedLatency};

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// All storefront state.
    pub shop: Arc<Shop>,
    /// Artificial latency applied by handlers.
    pub latency: SimulatedLatency,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(shop: Arc<Shop>, latency: SimulatedLatency) -> Self {
        Self { shop, latency }
    }

    /// Sleeps the endpoint's simulated processing time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the RNG lock is poisoned.
    pub async fn simulate(&self, endpoint: Endpoint) -> Result<(), DomainError> {
        self.latency.pause(endpoint, self.shop.rng()).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use loadmart_catalog::domain::catalog::Catalog;
    use loadmart_catalog::domain::product::{Category, Product};
    use loadmart_checkout::shop::{ShopConfig, ShopDeps};
    use loadmart_core::payment::PaymentGateway;
    use loadmart_test_support::{ApprovingPaymentGateway, FixedClock, MockRng};
    use rust_decimal::Decimal;

    use super::*;

    /// State over products priced 10.00 with the given stocks, no latency.
    pub(crate) fn state_with(stocks: &[u32], payments: Arc<dyn PaymentGateway>) -> AppState {
        let products = (1..)
            .zip(stocks)
            .map(|(id, &stock)| {
                Product::new(
                    id,
                    format!("Product {id}"),
                    Decimal::new(1000, 2),
                    Category::Books,
                    stock,
                )
            })
            .collect();
        let shop = Shop::with_catalog(
            Catalog::from_products(products).unwrap(),
            ShopConfig::default(),
            ShopDeps {
                clock: Arc::new(FixedClock::default()),
                rng: Arc::new(Mutex::new(MockRng)),
                payments,
            },
        );
        AppState::new(Arc::new(shop), SimulatedLatency::new(false))
    }

    pub(crate) fn test_state() -> AppState {
        state_with(&[5, 20, 0], Arc::new(ApprovingPaymentGateway))
    }
}
