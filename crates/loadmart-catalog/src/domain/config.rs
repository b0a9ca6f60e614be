//! Catalog generation settings.

use std::ops::RangeInclusive;

use loadmart_core::error::DomainError;

/// Named ranges that shape a randomly generated catalog.
///
/// The values are sampled once per generation: first how many products are
/// low on stock, then which ones, then each product's price, category and
/// stock. Only the distribution shape is predictable, never the values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Number of products to create.
    pub product_count: u32,
    /// Range for how many products receive low stock.
    pub low_stock_products: RangeInclusive<u32>,
    /// Stock range for low-stock products.
    pub low_stock_range: RangeInclusive<u32>,
    /// Stock range for every other product.
    pub normal_stock_range: RangeInclusive<u32>,
    /// Unit price range, in cents.
    pub price_cents_range: RangeInclusive<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            product_count: 100,
            low_stock_products: 5..=30,
            low_stock_range: 5..=10,
            normal_stock_range: 11..=50,
            price_cents_range: 1_000..=50_000,
        }
    }
}

impl CatalogConfig {
    /// Checks that every range is non-empty and the catalog is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` naming the offending setting.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.product_count == 0 {
            return Err(DomainError::InvalidInput(
                "product_count must be at least 1".to_owned(),
            ));
        }
        for (name, range) in [
            ("low_stock_products", &self.low_stock_products),
            ("low_stock_range", &self.low_stock_range),
            ("normal_stock_range", &self.normal_stock_range),
            ("price_cents_range", &self.price_cents_range),
        ] {
            if range.is_empty() {
                return Err(DomainError::InvalidInput(format!(
                    "{name} must satisfy min <= max, got {}-{}",
                    range.start(),
                    range.end()
                )));
            }
        }
        if *self.low_stock_products.start() > self.product_count {
            return Err(DomainError::InvalidInput(format!(
                "low_stock_products minimum {} exceeds product_count {}",
                self.low_stock_products.start(),
                self.product_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CatalogConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let config = CatalogConfig {
            low_stock_range: RangeInclusive::new(10, 5),
            ..CatalogConfig::default()
        };

        match config.validate() {
            Err(DomainError::InvalidInput(msg)) => assert!(msg.contains("low_stock_range")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let config = CatalogConfig {
            product_count: 0,
            ..CatalogConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_low_stock_minimum_above_product_count_is_rejected() {
        let config = CatalogConfig {
            product_count: 3,
            ..CatalogConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
