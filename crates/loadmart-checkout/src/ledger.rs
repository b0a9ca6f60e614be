//! Append-only order ledger.

use std::sync::{Mutex, MutexGuard};

use loadmart_core::error::DomainError;
use loadmart_core::money;
use rust_decimal::Decimal;

use crate::domain::order::Order;

/// Every committed order, oldest first. Cleared only by a reset.
#[derive(Debug, Default)]
pub struct OrderLedger {
    orders: Mutex<Vec<Order>>,
}

impl OrderLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn orders(&self) -> Result<MutexGuard<'_, Vec<Order>>, DomainError> {
        self.orders.lock().map_err(|_| DomainError::poisoned("order ledger"))
    }

    /// Appends a committed order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the ledger lock is poisoned.
    pub fn append(&self, order: Order) -> Result<(), DomainError> {
        self.orders()?.push(order);
        Ok(())
    }

    /// Number of orders.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the ledger lock is poisoned.
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.orders()?.len())
    }

    /// Sum of all order totals.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the ledger lock is poisoned.
    pub fn revenue(&self) -> Result<Decimal, DomainError> {
        Ok(money::round_currency(
            self.orders()?.iter().map(|order| order.total).sum(),
        ))
    }

    /// The last `count` orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the ledger lock is poisoned.
    pub fn recent(&self, count: usize) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders()?;
        let start = orders.len().saturating_sub(count);
        Ok(orders[start..].to_vec())
    }

    /// Drops every order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` if the ledger lock is poisoned.
    pub fn clear(&self) -> Result<(), DomainError> {
        self.orders()?.clear();
        Ok(())
    }
}
