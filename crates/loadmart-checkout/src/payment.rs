//! Simulated payment processing.

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use loadmart_core::error::DomainError;
use loadmart_core::payment::{PaymentGateway, PaymentRequest};
use loadmart_core::rng::DeterministicRng;
use tracing::debug;

/// Failure probability observed from the legacy storefront.
pub const DEFAULT_FAILURE_PROBABILITY: f64 = 0.05;

/// A gateway that declines a fixed share of charges at random and can take
/// a random amount of time doing so.
pub struct SimulatedPaymentGateway {
    failure_probability: f64,
    processing_ms: Option<RangeInclusive<u32>>,
    rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl std::fmt::Debug for SimulatedPaymentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedPaymentGateway")
            .field("failure_probability", &self.failure_probability)
            .field("processing_ms", &self.processing_ms)
            .finish_non_exhaustive()
    }
}

impl SimulatedPaymentGateway {
    /// Creates a gateway that answers immediately.
    #[must_use]
    pub fn new(failure_probability: f64, rng: Arc<Mutex<dyn DeterministicRng + Send>>) -> Self {
        Self {
            failure_probability,
            processing_ms: None,
            rng,
        }
    }

    /// Makes every charge take a random duration from `range`, in
    /// milliseconds.
    #[must_use]
    pub fn with_processing_delay(mut self, range: RangeInclusive<u32>) -> Self {
        self.processing_ms = Some(range);
        self
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<(), DomainError> {
        // Lock RNG only for the draws, never across the sleep.
        let (declined, delay_ms) = {
            let mut rng = self.rng.lock().map_err(|_| DomainError::poisoned("rng"))?;
            let declined = rng.chance(self.failure_probability);
            let delay_ms = self
                .processing_ms
                .as_ref()
                .map(|range| rng.next_u32_range(*range.start(), *range.end()));
            (declined, delay_ms)
        };

        if let Some(delay_ms) = delay_ms {
            tokio::time::sleep(Duration::from_millis(u64::from(delay_ms))).await;
        }

        debug!(
            username = %request.username,
            amount = %request.amount,
            declined,
            "simulated payment settled"
        );
        if declined {
            Err(DomainError::PaymentFailed(
                "payment processing failed, please try again".to_owned(),
            ))
        } else {
            Ok(())
        }
    }
}
