//! Orders appended by successful checkouts.

use chrono::{DateTime, Utc};
use loadmart_cart::domain::cart::CartLine;
use loadmart_catalog::domain::product::ProductId;
use loadmart_core::money;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// A purchased line, priced as quoted when it was added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    /// The product.
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Units bought.
    pub quantity: u32,
    /// Unit price paid.
    pub price: Decimal,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price,
        }
    }
}

/// An immutable order record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    /// `ORD-` followed by a time-ordered UUID.
    pub order_id: String,
    /// The buyer.
    pub username: String,
    /// Number of distinct products.
    pub items_count: usize,
    /// Purchased lines.
    pub items: Vec<OrderLine>,
    /// Amount charged.
    pub total: Decimal,
    /// Payment method label.
    pub payment_method: String,
    /// Shipping address.
    pub shipping_address: String,
    /// When the order was committed.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order from the cart lines that were reserved and paid for.
    #[must_use]
    pub fn place(
        username: String,
        lines: &[CartLine],
        payment_method: String,
        shipping_address: String,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let items: Vec<OrderLine> = lines.iter().map(OrderLine::from).collect();
        Self {
            order_id: format!("ORD-{}", Uuid::now_v7()),
            username,
            items_count: items.len(),
            total: money::total(items.iter().map(|item| (item.price, item.quantity))),
            items,
            payment_method,
            shipping_address,
            placed_at,
        }
    }
}
