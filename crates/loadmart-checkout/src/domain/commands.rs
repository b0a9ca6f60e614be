//! Commands for the Checkout context.

use loadmart_core::command::Command;
use uuid::Uuid;

/// Payment method recorded when the request names none.
pub const DEFAULT_PAYMENT_METHOD: &str = "credit_card";

/// Shipping address recorded when the request names none.
pub const DEFAULT_SHIPPING_ADDRESS: &str = "Not provided";

/// Command to check out the cart of the user owning `token`.
#[derive(Debug, Clone)]
pub struct Checkout {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Session token as presented by the client, `Bearer ` prefix allowed.
    pub token: Option<String>,
    /// Free-form payment method label.
    pub payment_method: String,
    /// Free-form shipping address.
    pub shipping_address: String,
}

impl Command for Checkout {
    fn command_type(&self) -> &'static str {
        "checkout.checkout"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to discard all state and regenerate the catalog.
#[derive(Debug, Clone)]
pub struct ResetStore {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResetStore {
    fn command_type(&self) -> &'static str {
        "checkout.reset_store"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
