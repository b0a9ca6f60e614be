//! Commands for the Cart context.

use loadmart_catalog::domain::product::ProductId;
use loadmart_core::command::Command;
use uuid::Uuid;

/// Command to add units of a product to a user's cart.
#[derive(Debug, Clone)]
pub struct AddItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The cart owner, resolved from the session token.
    pub username: String,
    /// The product to add.
    pub product_id: ProductId,
    /// Units to add; must be at least 1.
    pub quantity: u32,
}

impl Command for AddItem {
    fn command_type(&self) -> &'static str {
        "cart.add_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
