//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Every business-rule failure in the storefront is one of these variants.
/// None of them is fatal: the shared state stays serviceable after any
/// single failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A product (or other addressable resource) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request carried no session token, or an unknown one.
    #[error("unauthorized")]
    Unauthorized,

    /// A request parameter is missing or out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Not enough stock to satisfy the requested quantity.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// The product that could not be satisfied.
        product_id: u32,
        /// The quantity asked for (cumulative for cart adds).
        requested: u32,
        /// The stock observed at the time of the check.
        available: u32,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The simulated payment was declined. Retryable: the cart is kept and
    /// any reserved stock has been restored.
    #[error("payment failed: {0}")]
    PaymentFailed(String),

    /// An unexpected fault, e.g. a poisoned lock.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Builds the `Internal` error reported when a mutex was poisoned.
    #[must_use]
    pub fn poisoned(what: &str) -> Self {
        Self::Internal(format!("{what} mutex poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_names_requested_and_available() {
        let err = DomainError::InsufficientStock {
            product_id: 7,
            requested: 6,
            available: 5,
        };

        assert_eq!(
            err.to_string(),
            "insufficient stock for product 7: requested 6, available 5"
        );
    }

    #[test]
    fn test_poisoned_builds_internal_error() {
        assert_eq!(
            DomainError::poisoned("catalog"),
            DomainError::Internal("catalog mutex poisoned".to_owned())
        );
    }
}
