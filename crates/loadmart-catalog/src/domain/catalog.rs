//! The catalog aggregate: every product plus the stock transaction.

use loadmart_core::error::DomainError;
use loadmart_core::money;
use loadmart_core::rng::DeterministicRng;
use serde::Serialize;

use super::config::CatalogConfig;
use super::product::{Category, Product, ProductId, StockLevel};
use super::reservation::{Reservation, ReservedLine, RollbackPolicy};

/// Product counts per stock bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockSummary {
    /// Number of products.
    pub total: usize,
    /// Products with more than ten units.
    pub in_stock: usize,
    /// Products with one to ten units.
    pub low_stock: usize,
    /// Products with no units.
    pub out_of_stock: usize,
    /// Units across all products.
    pub total_units: u64,
}

/// All products of one generation, in creation order.
///
/// Product `n` lives at index `n - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    generation: u64,
    products: Vec<Product>,
}

impl Catalog {
    /// Generates a fresh catalog.
    ///
    /// Draw order: the low-stock count, a partial Fisher-Yates shuffle that
    /// picks the low-stock products, then price, category and stock for
    /// each product in id order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `config` is invalid.
    pub fn generate(
        config: &CatalogConfig,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let count = config.product_count;
        let low_count = rng.next_u32_range(
            *config.low_stock_products.start(),
            (*config.low_stock_products.end()).min(count),
        );

        let mut order: Vec<u32> = (0..count).collect();
        for i in 0..low_count {
            let j = rng.next_u32_range(i, count - 1);
            order.swap(i as usize, j as usize);
        }
        let mut is_low = vec![false; count as usize];
        for &index in &order[..low_count as usize] {
            is_low[index as usize] = true;
        }

        let last_category = Category::ALL.len() as u32 - 1;
        let products = (1..=count)
            .zip(is_low)
            .map(|(id, low)| {
                let price = money::from_cents(rng.next_u32_range(
                    *config.price_cents_range.start(),
                    *config.price_cents_range.end(),
                ));
                let category = Category::ALL[rng.next_u32_range(0, last_category) as usize];
                let range = if low {
                    &config.low_stock_range
                } else {
                    &config.normal_stock_range
                };
                let stock = rng.next_u32_range(*range.start(), *range.end());
                Product::new(id, format!("Product {id}"), price, category, stock)
            })
            .collect();

        Ok(Self {
            generation: 0,
            products,
        })
    }

    /// Builds a catalog from explicit products.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` unless the ids run `1..=N` in order.
    pub fn from_products(products: Vec<Product>) -> Result<Self, DomainError> {
        for (expected, product) in (1..).zip(&products) {
            if product.id() != expected {
                return Err(DomainError::InvalidInput(format!(
                    "product ids must run 1..=N in order; found {} at position {expected}",
                    product.id()
                )));
            }
        }
        Ok(Self {
            generation: 0,
            products,
        })
    }

    /// Generation counter; bumped every time the catalog is superseded.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Every product, in creation order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` for an unknown id.
    pub fn get(&self, id: ProductId) -> Result<&Product, DomainError> {
        id.checked_sub(1)
            .and_then(|index| self.products.get(index as usize))
            .ok_or_else(|| not_found(id))
    }

    fn get_mut(&mut self, id: ProductId) -> Result<&mut Product, DomainError> {
        id.checked_sub(1)
            .and_then(|index| self.products.get_mut(index as usize))
            .ok_or_else(|| not_found(id))
    }

    /// A page of products in creation order. Out-of-range pages are empty.
    #[must_use]
    pub fn list(&self, offset: usize, limit: usize) -> &[Product] {
        let start = offset.min(self.products.len());
        let end = start.saturating_add(limit).min(self.products.len());
        &self.products[start..end]
    }

    /// Products whose name or category contains `query`, ignoring case, in
    /// catalog order.
    #[must_use]
    pub fn search(&self, query: &str, in_stock_only: bool) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|product| !in_stock_only || product.stock() > 0)
            .filter(|product| product.matches(&needle))
            .collect()
    }

    /// Counts products per stock bucket.
    #[must_use]
    pub fn stock_summary(&self) -> StockSummary {
        self.products
            .iter()
            .fold(StockSummary::default(), |mut summary, product| {
                summary.total += 1;
                summary.total_units += u64::from(product.stock());
                match product.stock_level() {
                    StockLevel::InStock => summary.in_stock += 1,
                    StockLevel::LowStock => summary.low_stock += 1,
                    StockLevel::OutOfStock => summary.out_of_stock += 1,
                }
                summary
            })
    }

    /// Validates that every requested line can be satisfied right now.
    ///
    /// Requests for the same product are merged. The returned check borrows
    /// the catalog mutably, so nothing can change stock between this
    /// validation and [`StockCheck::reserve`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` for an empty request or a zero
    /// quantity, `DomainError::NotFound` for an unknown product and
    /// `DomainError::InsufficientStock` naming the first short product.
    pub fn check_stock(
        &mut self,
        request: &[(ProductId, u32)],
    ) -> Result<StockCheck<'_>, DomainError> {
        if request.is_empty() {
            return Err(DomainError::InvalidInput("nothing to reserve".to_owned()));
        }

        let mut lines: Vec<ReservedLine> = Vec::with_capacity(request.len());
        for &(product_id, quantity) in request {
            if quantity == 0 {
                return Err(DomainError::InvalidInput(format!(
                    "quantity for product {product_id} must be at least 1"
                )));
            }
            match lines.iter_mut().find(|line| line.product_id == product_id) {
                Some(line) => {
                    line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                        DomainError::InvalidInput(format!(
                            "quantity for product {product_id} overflows"
                        ))
                    })?;
                }
                None => lines.push(ReservedLine {
                    product_id,
                    quantity,
                }),
            }
        }

        for line in &lines {
            let product = self.get(line.product_id)?;
            if product.stock() < line.quantity {
                return Err(DomainError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available: product.stock(),
                });
            }
        }

        Ok(StockCheck {
            catalog: self,
            lines,
        })
    }

    /// Puts a reservation's stock back.
    ///
    /// Returns `false` without touching anything when the reservation came
    /// from an earlier generation (the catalog was reset meanwhile).
    pub fn release(&mut self, reservation: Reservation, policy: RollbackPolicy) -> bool {
        if reservation.generation() != self.generation {
            return false;
        }
        for line in reservation.lines() {
            // Lines were validated against this generation, so the product exists.
            if let Ok(product) = self.get_mut(line.product_id) {
                product.stock += line.quantity;
                if policy == RollbackPolicy::RestorePurchaseCount {
                    product.purchase_count = product.purchase_count.saturating_sub(1);
                }
            }
        }
        true
    }

    /// Finalizes a reservation once `record` succeeds: its stock is then
    /// sold for good. If `record` fails the reservation is released under
    /// `policy`, so stock never leaves the catalog without a record of the
    /// sale.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` when the reservation belongs to an
    /// earlier generation (`record` is not called), or whatever `record`
    /// returns.
    pub fn commit<T>(
        &mut self,
        reservation: Reservation,
        policy: RollbackPolicy,
        record: impl FnOnce() -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        if reservation.generation() != self.generation {
            return Err(DomainError::Internal(format!(
                "reservation from catalog generation {} committed against generation {}",
                reservation.generation(),
                self.generation
            )));
        }
        record().inspect_err(|_| {
            self.release(reservation, policy);
        })
    }

    /// Replaces every product with `next`, bumping the generation so
    /// reservations taken from the old products can no longer touch stock.
    pub fn supersede(&mut self, next: Self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            products: next.products,
        };
    }
}

/// A validated stock request, ready to be reserved.
#[derive(Debug)]
pub struct StockCheck<'a> {
    catalog: &'a mut Catalog,
    lines: Vec<ReservedLine>,
}

impl StockCheck<'_> {
    /// The merged lines that passed validation.
    #[must_use]
    pub fn lines(&self) -> &[ReservedLine] {
        &self.lines
    }

    /// Decrements stock and increments the purchase counter for every line.
    pub fn reserve(self) -> Reservation {
        let generation = self.catalog.generation;
        for line in &self.lines {
            if let Ok(product) = self.catalog.get_mut(line.product_id) {
                product.stock -= line.quantity;
                product.purchase_count += 1;
            }
        }
        Reservation::new(generation, self.lines)
    }
}

fn not_found(id: ProductId) -> DomainError {
    DomainError::NotFound(format!("product {id}"))
}
