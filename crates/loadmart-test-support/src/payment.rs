//! Test gateways — `PaymentGateway` implementations with fixed outcomes.

use std::sync::Mutex;

use async_trait::async_trait;
use loadmart_core::error::DomainError;
use loadmart_core::payment::{PaymentGateway, PaymentRequest};

/// A gateway that accepts every charge.
#[derive(Debug, Default)]
pub struct ApprovingPaymentGateway;

#[async_trait]
impl PaymentGateway for ApprovingPaymentGateway {
    async fn charge(&self, _request: &PaymentRequest) -> Result<(), DomainError> {
        Ok(())
    }
}

/// A gateway that declines every charge. Useful for testing rollback.
#[derive(Debug, Default)]
pub struct DecliningPaymentGateway;

#[async_trait]
impl PaymentGateway for DecliningPaymentGateway {
    async fn charge(&self, _request: &PaymentRequest) -> Result<(), DomainError> {
        Err(DomainError::PaymentFailed("card declined".into()))
    }
}

/// A gateway that records every charge and answers from a script of
/// outcomes (`true` = approve). Once the script runs out it approves.
#[derive(Debug, Default)]
pub struct RecordingPaymentGateway {
    outcomes: Mutex<Vec<bool>>,
    charged: Mutex<Vec<PaymentRequest>>,
}

impl RecordingPaymentGateway {
    /// Create a gateway that answers with `outcomes`, first to last.
    #[must_use]
    pub fn new(outcomes: Vec<bool>) -> Self {
        let mut outcomes = outcomes;
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            charged: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all charge requests seen so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn charges(&self) -> Vec<PaymentRequest> {
        self.charged.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for RecordingPaymentGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<(), DomainError> {
        self.charged.lock().unwrap().push(request.clone());
        let approve = self.outcomes.lock().unwrap().pop().unwrap_or(true);
        if approve {
            Ok(())
        } else {
            Err(DomainError::PaymentFailed("scripted decline".into()))
        }
    }
}
