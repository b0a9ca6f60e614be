//! Carts and the advisory stock pre-check.

use loadmart_catalog::domain::product::{Product, ProductId};
use loadmart_core::error::DomainError;
use loadmart_core::money;
use rust_decimal::Decimal;
use serde::Serialize;

/// A line in a cart. Name and price are captured when the line is first
/// added; checkout charges that quoted price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// The product.
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Decimal,
    /// Units in the cart, at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line before rounding.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        money::line_total(self.price, self.quantity)
    }
}

/// A user's pending line items, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Units of `product_id` already in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// `Σ price × quantity`, rounded to currency precision.
    #[must_use]
    pub fn total(&self) -> Decimal {
        money::total(self.lines.iter().map(|line| (line.price, line.quantity)))
    }

    /// `(product, quantity)` pairs for a stock reservation.
    #[must_use]
    pub fn reservation_request(&self) -> Vec<(ProductId, u32)> {
        self.lines
            .iter()
            .map(|line| (line.product_id, line.quantity))
            .collect()
    }

    /// Checks that adding `quantity` units of `product` would not exceed
    /// the stock observed right now, counting what is already in the cart.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientStock` with the requested (or
    /// cumulative) quantity and the available stock.
    pub fn check_stock(&self, product: &Product, quantity: u32) -> Result<(), DomainError> {
        let available = product.stock();
        let shortage = |requested| DomainError::InsufficientStock {
            product_id: product.id(),
            requested,
            available,
        };
        if quantity > available {
            return Err(shortage(quantity));
        }
        let cumulative = self
            .quantity_of(product.id())
            .checked_add(quantity)
            .ok_or_else(|| shortage(u32::MAX))?;
        if cumulative > available {
            return Err(shortage(cumulative));
        }
        Ok(())
    }

    /// Adds units: summed in place for a product already present,
    /// otherwise appended with the product's current name and price.
    pub(crate) fn add(&mut self, product: &Product, quantity: u32) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id())
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product_id: product.id(),
                name: product.name().to_owned(),
                price: product.price(),
                quantity,
            }),
        }
    }

    /// Takes purchased units out of the cart, dropping lines that reach
    /// zero. Units added after the purchase was reserved stay.
    pub(crate) fn remove_purchased(&mut self, purchased: &[(ProductId, u32)]) {
        for &(product_id, quantity) in purchased {
            if let Some(line) = self
                .lines
                .iter_mut()
                .find(|line| line.product_id == product_id)
            {
                line.quantity = line.quantity.saturating_sub(quantity);
            }
        }
        self.lines.retain(|line| line.quantity > 0);
    }
}
