//! Stock reservations.
//!
//! A `Reservation` is the only handle through which stock that left the
//! catalog can come back. It cannot be cloned or built outside this crate,
//! so every release matches exactly one earlier decrement.

use serde::Serialize;

use super::product::ProductId;

/// One product's share of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReservedLine {
    /// The reserved product.
    pub product_id: ProductId,
    /// Units taken out of stock.
    pub quantity: u32,
}

/// Stock removed from a specific catalog generation, pending payment.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a reservation must be committed or released"]
pub struct Reservation {
    generation: u64,
    lines: Vec<ReservedLine>,
}

impl Reservation {
    pub(crate) fn new(generation: u64, lines: Vec<ReservedLine>) -> Self {
        Self { generation, lines }
    }

    /// Catalog generation the stock was taken from.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Reserved lines, one per product.
    #[must_use]
    pub fn lines(&self) -> &[ReservedLine] {
        &self.lines
    }

    /// Total units held by this reservation.
    #[must_use]
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// What a rollback does with the purchase counters it incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollbackPolicy {
    /// Restore stock only; a declined payment still counts as purchase
    /// interest.
    #[default]
    KeepPurchaseCount,
    /// Restore stock and undo the purchase-counter increment.
    RestorePurchaseCount,
}
