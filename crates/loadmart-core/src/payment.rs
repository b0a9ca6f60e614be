//! Payment gateway abstraction.
//!
//! Checkout never talks to a real processor; it calls through this trait so
//! the server can plug in a randomized simulation and tests can plug in
//! gateways with fixed outcomes.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::DomainError;

/// A single charge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// The user being charged.
    pub username: String,
    /// Amount to charge, already rounded to currency precision.
    pub amount: Decimal,
    /// Free-form payment method label (e.g. `credit_card`).
    pub payment_method: String,
}

/// Gateway that settles a charge.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Attempts to charge the request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PaymentFailed` when the charge is declined.
    async fn charge(&self, request: &PaymentRequest) -> Result<(), DomainError>;
}
