//! Command handlers for the Cart context.
//!
//! The stock pre-check runs inside the catalog's exclusive section so it
//! serializes with checkouts, but it stays advisory: stock may change again
//! before the user checks out.

use loadmart_catalog::store::CatalogStore;
use loadmart_core::command::Command;
use loadmart_core::error::DomainError;
use tracing::{debug, warn};

use crate::book::CartBook;
use crate::domain::commands::AddItem;

/// Result of a successful add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddItemResult {
    /// Number of distinct products in the cart afterwards.
    pub cart_items: usize,
}

/// Handles the `AddItem` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput`, `DomainError::NotFound` or
/// `DomainError::InsufficientStock` as described on
/// [`CartBook::add_item`], and `DomainError::Internal` if the catalog lock
/// is poisoned.
pub fn handle_add_item(
    command: &AddItem,
    catalog: &CatalogStore,
    carts: &CartBook,
) -> Result<AddItemResult, DomainError> {
    let catalog = catalog.exclusive()?;
    let result = carts.add_item(
        &catalog,
        &command.username,
        command.product_id,
        command.quantity,
    );
    drop(catalog);

    match result {
        Ok(cart_items) => {
            debug!(
                command = command.command_type(),
                correlation_id = %command.correlation_id,
                cart_items,
                "item added to cart"
            );
            Ok(AddItemResult { cart_items })
        }
        Err(err) => {
            if matches!(err, DomainError::InsufficientStock { .. }) {
                warn!(
                    correlation_id = %command.correlation_id,
                    username = %command.username,
                    error = %err,
                    "add to cart blocked by stock pre-check"
                );
            }
            Err(err)
        }
    }
}
