//! Command handlers for the Checkout context.
//!
//! Checkout enters the catalog's exclusive section twice: once to validate
//! and reserve every cart line, and once more to either commit the order or
//! restore the reserved stock. The payment call in between runs outside the
//! section so slow payments never serialize other checkouts.

use loadmart_catalog::domain::catalog::{Catalog, StockSummary};
use loadmart_catalog::domain::reservation::{Reservation, RollbackPolicy};
use loadmart_catalog::store::CatalogStore;
use loadmart_core::command::Command;
use loadmart_core::error::DomainError;
use loadmart_core::payment::PaymentRequest;
use loadmart_session::application::query_handlers::resolve_user;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::domain::commands::{Checkout, ResetStore};
use crate::domain::order::Order;
use crate::domain::phase::CheckoutPhase;
use crate::shop::Shop;

/// Delivery estimate quoted on every successful order.
pub const ESTIMATED_DELIVERY: &str = "3-5 business days";

/// Result of a committed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    /// The new order's id.
    pub order_id: String,
    /// Amount charged.
    pub total: Decimal,
    /// Number of distinct products bought.
    pub items_purchased: usize,
    /// Payment method label.
    pub payment_method: String,
    /// Shipping address.
    pub shipping_address: String,
    /// Delivery estimate.
    pub estimated_delivery: &'static str,
}

/// Result of a store reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    /// Generation of the fresh catalog.
    pub generation: u64,
    /// Product counts of the fresh catalog.
    pub products: StockSummary,
    /// Orders left in the ledger (always zero).
    pub orders: usize,
    /// Sessions left (always zero).
    pub active_sessions: usize,
    /// Carts left (always zero).
    pub active_carts: usize,
    /// Blocked-attempt counter (always zero).
    pub blocked_attempts: u64,
}

/// Stock reserved by an in-flight checkout.
///
/// If the checkout future is dropped while payment is pending, the guard
/// hands the reservation back so no stock leaks.
struct PendingReservation<'a> {
    catalog: &'a CatalogStore,
    policy: RollbackPolicy,
    reservation: Option<Reservation>,
}

impl<'a> PendingReservation<'a> {
    fn new(catalog: &'a CatalogStore, policy: RollbackPolicy, reservation: Reservation) -> Self {
        Self {
            catalog,
            policy,
            reservation: Some(reservation),
        }
    }

    fn settle(&mut self) -> Result<Reservation, DomainError> {
        self.reservation
            .take()
            .ok_or_else(|| DomainError::Internal("reservation already settled".to_owned()))
    }
}

impl Drop for PendingReservation<'_> {
    fn drop(&mut self) {
        let Some(reservation) = self.reservation.take() else {
            return;
        };
        let units = reservation.units();
        match self.catalog.release(reservation, self.policy) {
            Ok(_) => warn!(units, "checkout abandoned during payment; reservation released"),
            Err(err) => error!(error = %err, units, "failed to release abandoned reservation"),
        }
    }
}

fn enter(
    phase: CheckoutPhase,
    next: CheckoutPhase,
    command: &Checkout,
) -> Result<CheckoutPhase, DomainError> {
    let next = phase.advance(next)?;
    debug!(
        correlation_id = %command.correlation_id,
        from = %phase,
        to = %next,
        "checkout transition"
    );
    Ok(next)
}

/// Handles the `Checkout` command.
///
/// # Errors
///
/// Returns `DomainError::Unauthorized` for a missing or unknown token,
/// `DomainError::EmptyCart` when there is nothing to buy,
/// `DomainError::InsufficientStock` (or `NotFound`) when a line fails
/// validation, `DomainError::PaymentFailed` after a rollback, and
/// `DomainError::Internal` when a reset overtook the checkout or a lock is
/// poisoned.
pub async fn handle_checkout(
    command: &Checkout,
    shop: &Shop,
) -> Result<CheckoutReceipt, DomainError> {
    let username = resolve_user(command.token.as_deref(), shop.sessions())?;
    let policy = shop.config().rollback_policy;
    let mut phase = CheckoutPhase::Validating;

    // Cart adds run inside the same section, so the snapshot below is the
    // cart exactly as reserved.
    let (cart, request, reservation) = {
        let mut catalog = shop.catalog().exclusive()?;
        let cart = shop.carts().cart(&username);
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        let request = cart.reservation_request();
        let check = catalog.check_stock(&request).inspect_err(|err| {
            warn!(
                correlation_id = %command.correlation_id,
                username = %username,
                error = %err,
                "checkout validation failed"
            );
        })?;
        phase = enter(phase, CheckoutPhase::Reserving, command)?;
        let reservation = check.reserve();
        (cart, request, reservation)
    };
    let mut pending = PendingReservation::new(shop.catalog(), policy, reservation);

    let total = cart.total();
    phase = enter(phase, CheckoutPhase::Paying, command)?;
    let payment = PaymentRequest {
        username: username.clone(),
        amount: total,
        payment_method: command.payment_method.clone(),
    };

    if let Err(err) = shop.payments().charge(&payment).await {
        let reservation = pending.settle()?;
        let units = reservation.units();
        shop.catalog().release(reservation, policy)?;
        enter(phase, CheckoutPhase::RolledBack, command)?;
        warn!(
            correlation_id = %command.correlation_id,
            username = %username,
            units,
            error = %err,
            "payment failed; reserved stock restored"
        );
        return Err(err);
    }

    // Commit in one step: the order is recorded before the stock counts as
    // sold, and only the purchased units leave the cart.
    let order = {
        let mut catalog = shop.catalog().exclusive()?;
        let reservation = pending.settle()?;
        let order = catalog.commit(reservation, policy, || {
            let order = Order::place(
                username,
                cart.lines(),
                command.payment_method.clone(),
                command.shipping_address.clone(),
                shop.clock().now(),
            );
            shop.orders().append(order.clone())?;
            Ok(order)
        })?;
        shop.carts().remove_purchased(&order.username, &request);
        order
    };
    enter(phase, CheckoutPhase::Committed, command)?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        order_id = %order.order_id,
        total = %order.total,
        "order placed"
    );
    Ok(CheckoutReceipt {
        order_id: order.order_id,
        total: order.total,
        items_purchased: order.items_count,
        payment_method: order.payment_method,
        shipping_address: order.shipping_address,
        estimated_delivery: ESTIMATED_DELIVERY,
    })
}

/// Handles the `ResetStore` command: regenerates the catalog and clears
/// carts, sessions and orders in one step of the exclusive section.
///
/// The fresh catalog is generated before entering the section; the RNG lock
/// is never held together with the catalog lock.
///
/// # Errors
///
/// Returns `DomainError::Internal` if a lock is poisoned and
/// `DomainError::InvalidInput` if the catalog configuration is invalid.
pub fn handle_reset(command: &ResetStore, shop: &Shop) -> Result<ResetSummary, DomainError> {
    let fresh = {
        let mut rng = shop.rng().lock().map_err(|_| DomainError::poisoned("rng"))?;
        Catalog::generate(&shop.config().catalog, &mut *rng)?
    };

    let summary = {
        let mut catalog = shop.catalog().exclusive()?;
        catalog.supersede(fresh);
        shop.carts().reset();
        shop.sessions().clear();
        shop.orders().clear()?;
        ResetSummary {
            generation: catalog.generation(),
            products: catalog.stock_summary(),
            orders: shop.orders().len()?,
            active_sessions: shop.sessions().len(),
            active_carts: shop.carts().active_carts(),
            blocked_attempts: shop.carts().blocked_attempts(),
        }
    };

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        generation = summary.generation,
        products = summary.products.total,
        low_stock = summary.products.low_stock,
        "store reset"
    );
    Ok(summary)
}
