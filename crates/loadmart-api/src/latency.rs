//! Artificial per-endpoint latency.
//!
//! Load tests against this service expect a backend that takes a realistic,
//! jittery amount of time. Handlers pause before doing any work, so the
//! sleep never overlaps the catalog's exclusive section.

use std::ops::RangeInclusive;
use std::sync::Mutex;
use std::time::Duration;

use loadmart_core::error::DomainError;
use loadmart_core::rng::DeterministicRng;

/// Endpoints with a simulated processing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /api/auth/login`
    Login,
    /// `GET /api/products`
    ListProducts,
    /// `GET /api/products/{id}`
    ProductDetail,
    /// `GET /api/search`
    Search,
    /// `GET /api/cart`
    ViewCart,
    /// `POST /api/cart/add`
    AddToCart,
    /// `POST /api/checkout`, spent inside the payment gateway.
    Checkout,
    /// `GET /api/users/{id}`
    UserProfile,
}

impl Endpoint {
    /// Processing time range in milliseconds.
    #[must_use]
    pub const fn range_ms(self) -> RangeInclusive<u32> {
        match self {
            Self::Login | Self::ListProducts => 100..=300,
            Self::ProductDetail | Self::UserProfile => 50..=150,
            Self::Search => 150..=400,
            Self::ViewCart => 50..=100,
            Self::AddToCart => 100..=200,
            Self::Checkout => 300..=800,
        }
    }
}

/// Switch for the simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    enabled: bool,
}

impl SimulatedLatency {
    /// Latency on or off.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether handlers sleep at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Sleeps for a random duration drawn from the endpoint's range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the RNG lock is poisoned.
    pub async fn pause(
        self,
        endpoint: Endpoint,
        rng: &Mutex<dyn DeterministicRng + Send>,
    ) -> Result<(), DomainError> {
        if !self.enabled {
            return Ok(());
        }
        let range = endpoint.range_ms();
        let millis = {
            let mut rng = rng.lock().map_err(|_| DomainError::poisoned("rng"))?;
            rng.next_u32_range(*range.start(), *range.end())
        };
        tokio::time::sleep(Duration::from_millis(u64::from(millis))).await;
        Ok(())
    }
}
