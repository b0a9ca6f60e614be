//! Query handlers for the Cart context.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::book::CartBook;
use crate::domain::cart::CartLine;

/// Read-only view of a user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    /// Lines in insertion order.
    pub cart: Vec<CartLine>,
    /// Number of distinct products.
    pub items_count: usize,
    /// `Σ price × quantity`, rounded to currency precision.
    pub total: Decimal,
}

/// Returns `username`'s cart; an unknown user simply has an empty cart.
#[must_use]
pub fn view_cart(username: &str, carts: &CartBook) -> CartView {
    let cart = carts.cart(username);
    CartView {
        items_count: cart.line_count(),
        total: cart.total(),
        cart: cart.lines().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use loadmart_catalog::domain::catalog::Catalog;
    use loadmart_catalog::domain::product::{Category, Product};

    use super::*;

    #[test]
    fn test_view_cart_computes_total() {
        // Arrange
        let catalog = Catalog::from_products(vec![
            Product::new(1, "Product 1", Decimal::new(1000, 2), Category::Home, 10),
            Product::new(2, "Product 2", Decimal::new(550, 2), Category::Home, 10),
        ])
        .unwrap();
        let carts = CartBook::new();
        carts.add_item(&catalog, "alice", 1, 2).unwrap();
        carts.add_item(&catalog, "alice", 2, 1).unwrap();

        // Act
        let view = view_cart("alice", &carts);

        // Assert
        assert_eq!(view.items_count, 2);
        assert_eq!(view.total, Decimal::new(2550, 2));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["total"], 25.5);
        assert_eq!(json["cart"][0]["quantity"], 2);
    }

    #[test]
    fn test_view_cart_for_unknown_user_is_empty() {
        let view = view_cart("nobody", &CartBook::new());

        assert_eq!(view.items_count, 0);
        assert_eq!(view.total, Decimal::ZERO);
        assert!(view.cart.is_empty());
    }
}
