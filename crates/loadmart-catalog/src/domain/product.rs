//! Products and their stock classification.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, assigned `1..=N` when a catalog is generated.
pub type ProductId = u32;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Electronics.
    Electronics,
    /// Clothing.
    Clothing,
    /// Books.
    Books,
    /// Home goods.
    Home,
}

impl Category {
    /// Every category, in the order generation draws from.
    pub const ALL: [Self; 4] = [Self::Electronics, Self::Clothing, Self::Books, Self::Home];

    /// Display name, also the text search matches against.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Books => "Books",
            Self::Home => "Home",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock bucket used by product views and aggregate counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// No units left.
    OutOfStock,
    /// Between 1 and [`StockLevel::LOW_STOCK_MAX`] units.
    LowStock,
    /// More than [`StockLevel::LOW_STOCK_MAX`] units.
    InStock,
}

impl StockLevel {
    /// Highest stock still considered low.
    pub const LOW_STOCK_MAX: u32 = 10;

    /// Classifies a stock count.
    #[must_use]
    pub const fn of(stock: u32) -> Self {
        match stock {
            0 => Self::OutOfStock,
            1..=Self::LOW_STOCK_MAX => Self::LowStock,
            _ => Self::InStock,
        }
    }

    /// Human-readable status label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

/// A product in the catalog.
///
/// Name, price, category and initial stock never change after creation.
/// `stock` and `purchase_count` are only touched by the catalog's
/// reservation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    category: Category,
    initial_stock: u32,
    pub(crate) stock: u32,
    pub(crate) purchase_count: u64,
}

impl Product {
    /// Creates a product with full stock and no purchases.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        category: Category,
        stock: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category,
            initial_stock: stock,
            stock,
            purchase_count: 0,
        }
    }

    /// Product identifier.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    /// Product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Stock at creation time; only used for display ratios.
    #[must_use]
    pub const fn initial_stock(&self) -> u32 {
        self.initial_stock
    }

    /// Units currently purchasable.
    #[must_use]
    pub const fn stock(&self) -> u32 {
        self.stock
    }

    /// Number of checkouts that reserved this product.
    #[must_use]
    pub const fn purchase_count(&self) -> u64 {
        self.purchase_count
    }

    /// Current stock bucket.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }

    /// Case-insensitive substring match over name or category.
    /// `needle` must already be lower-case.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.as_str().to_lowercase().contains(needle)
    }
}
