//! The cart book: every user's cart plus the blocked-attempt counter.
//!
//! Carts live in a `DashMap` keyed by username. Each entry is locked on its
//! own, so adds from different users never contend while two adds to the
//! same cart are serialized. An entry exists only while its cart has lines.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use loadmart_catalog::domain::catalog::Catalog;
use loadmart_catalog::domain::product::ProductId;
use loadmart_core::error::DomainError;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::cart::Cart;

/// One row of the cart overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// The cart owner.
    pub user: String,
    /// Number of distinct products.
    pub items_count: usize,
    /// Cart total.
    pub total: Decimal,
}

/// All carts.
#[derive(Debug, Default)]
pub struct CartBook {
    carts: DashMap<String, Cart>,
    blocked_attempts: AtomicU64,
}

impl CartBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of a product to `username`'s cart after the
    /// advisory stock pre-check against `catalog`. Returns the number of
    /// lines in the cart afterwards.
    ///
    /// A failed pre-check bumps the blocked-attempt counter and leaves the
    /// cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` for a zero quantity,
    /// `DomainError::NotFound` for an unknown product and
    /// `DomainError::InsufficientStock` when the pre-check fails.
    pub fn add_item(
        &self,
        catalog: &Catalog,
        username: &str,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<usize, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidInput(
                "quantity must be at least 1".to_owned(),
            ));
        }
        let product = catalog.get(product_id)?;

        let added = {
            let mut cart = self.carts.entry(username.to_owned()).or_default();
            cart.check_stock(product, quantity).map(|()| {
                cart.add(product, quantity);
                cart.line_count()
            })
        };

        if added.is_err() {
            self.blocked_attempts.fetch_add(1, Ordering::Relaxed);
            self.carts.remove_if(username, |_, cart| cart.is_empty());
        }
        added
    }

    /// A copy of `username`'s cart; empty if there is none.
    #[must_use]
    pub fn cart(&self, username: &str) -> Cart {
        self.carts
            .get(username)
            .map(|cart| cart.clone())
            .unwrap_or_default()
    }

    /// Empties `username`'s cart.
    pub fn clear(&self, username: &str) {
        self.carts.remove(username);
    }

    /// Takes the units of a completed purchase out of `username`'s cart.
    /// Lines added or topped up since the purchase was reserved are kept;
    /// the entry goes away once nothing is left.
    pub fn remove_purchased(&self, username: &str, purchased: &[(ProductId, u32)]) {
        if let Some(mut cart) = self.carts.get_mut(username) {
            cart.remove_purchased(purchased);
        }
        self.carts.remove_if(username, |_, cart| cart.is_empty());
    }

    /// Drops every cart and zeroes the blocked-attempt counter.
    pub fn reset(&self) {
        self.carts.clear();
        self.blocked_attempts.store(0, Ordering::Relaxed);
    }

    /// Number of carts holding at least one line.
    #[must_use]
    pub fn active_carts(&self) -> usize {
        self.carts.len()
    }

    /// Adds rejected by the stock pre-check since the last reset.
    #[must_use]
    pub fn blocked_attempts(&self) -> u64 {
        self.blocked_attempts.load(Ordering::Relaxed)
    }

    /// One summary per active cart, sorted by user.
    #[must_use]
    pub fn summaries(&self) -> Vec<CartSummary> {
        let mut summaries: Vec<CartSummary> = self
            .carts
            .iter()
            .map(|entry| CartSummary {
                user: entry.key().clone(),
                items_count: entry.line_count(),
                total: entry.total(),
            })
            .collect();
        summaries.sort_by(|a, b| a.user.cmp(&b.user));
        summaries
    }
}
