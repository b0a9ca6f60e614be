//! The storefront aggregate.
//!
//! `Shop` owns every piece of mutable state. The catalog store's exclusive
//! section is the single serialization point; whenever a carts, sessions or
//! orders lock is needed alongside it, the catalog is entered first.

use std::sync::{Arc, Mutex};

use loadmart_cart::book::CartBook;
use loadmart_catalog::domain::catalog::Catalog;
use loadmart_catalog::domain::config::CatalogConfig;
use loadmart_catalog::domain::reservation::RollbackPolicy;
use loadmart_catalog::store::CatalogStore;
use loadmart_core::clock::Clock;
use loadmart_core::error::DomainError;
use loadmart_core::payment::PaymentGateway;
use loadmart_core::rng::DeterministicRng;
use loadmart_session::store::SessionStore;

use crate::ledger::OrderLedger;

/// Behavioral settings for a shop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopConfig {
    /// How catalogs are generated at startup and on every reset.
    pub catalog: CatalogConfig,
    /// What a payment rollback does with purchase counters.
    pub rollback_policy: RollbackPolicy,
}

/// Collaborators a shop draws on.
pub struct ShopDeps {
    /// Source of timestamps for sessions and orders.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Shared RNG for catalog generation and other simulations.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Gateway that settles checkouts.
    pub payments: Arc<dyn PaymentGateway>,
}

/// All storefront state.
pub struct Shop {
    catalog: CatalogStore,
    carts: CartBook,
    sessions: SessionStore,
    orders: OrderLedger,
    config: ShopConfig,
    deps: ShopDeps,
}

impl std::fmt::Debug for Shop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shop")
            .field("catalog", &self.catalog)
            .field("carts", &self.carts)
            .field("sessions", &self.sessions)
            .field("orders", &self.orders)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Shop {
    /// Creates a shop with a freshly generated catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` for an invalid catalog
    /// configuration and `DomainError::Internal` if the RNG lock is
    /// poisoned.
    pub fn new(config: ShopConfig, deps: ShopDeps) -> Result<Self, DomainError> {
        let catalog = {
            let mut rng = deps.rng.lock().map_err(|_| DomainError::poisoned("rng"))?;
            Catalog::generate(&config.catalog, &mut *rng)?
        };
        Ok(Self::with_catalog(catalog, config, deps))
    }

    /// Creates a shop around an explicit catalog. Resets still generate
    /// from `config`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog, config: ShopConfig, deps: ShopDeps) -> Self {
        Self {
            catalog: CatalogStore::new(catalog),
            carts: CartBook::new(),
            sessions: SessionStore::new(),
            orders: OrderLedger::new(),
            config,
            deps,
        }
    }

    /// The catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Every user's cart.
    #[must_use]
    pub fn carts(&self) -> &CartBook {
        &self.carts
    }

    /// Live sessions.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Committed orders.
    #[must_use]
    pub fn orders(&self) -> &OrderLedger {
        &self.orders
    }

    /// Behavioral settings.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// The clock.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.deps.clock.as_ref()
    }

    /// The shared RNG.
    #[must_use]
    pub fn rng(&self) -> &Mutex<dyn DeterministicRng + Send> {
        &self.deps.rng
    }

    /// The payment gateway.
    #[must_use]
    pub fn payments(&self) -> &dyn PaymentGateway {
        self.deps.payments.as_ref()
    }
}
