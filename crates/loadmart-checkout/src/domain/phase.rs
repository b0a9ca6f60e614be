//! The checkout state machine.
//!
//! ```text
//! VALIDATING -> RESERVING -> PAYING -> COMMITTED
//!                                   \-> ROLLED_BACK
//! ```
//!
//! A failed validation aborts before any state changes, so it has no
//! terminal phase of its own.

use std::fmt;

use loadmart_core::error::DomainError;

/// Where a checkout currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Checking every cart line against current stock.
    Validating,
    /// Decrementing stock for every line.
    Reserving,
    /// Waiting on the payment gateway, outside the exclusive section.
    Paying,
    /// Order appended and cart cleared.
    Committed,
    /// Payment failed and the reserved stock was restored.
    RolledBack,
}

impl CheckoutPhase {
    /// Whether the checkout is finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack)
    }

    /// Whether `next` directly follows `self`.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Validating, Self::Reserving)
                | (Self::Reserving, Self::Paying)
                | (Self::Paying, Self::Committed | Self::RolledBack)
        )
    }

    /// Moves to `next`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Internal` for a transition the machine does not
    /// allow.
    pub fn advance(self, next: Self) -> Result<Self, DomainError> {
        if self.can_advance_to(next) {
            Ok(next)
        } else {
            Err(DomainError::Internal(format!(
                "illegal checkout transition {self} -> {next}"
            )))
        }
    }
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validating => "VALIDATING",
            Self::Reserving => "RESERVING",
            Self::Paying => "PAYING",
            Self::Committed => "COMMITTED",
            Self::RolledBack => "ROLLED_BACK",
        })
    }
}
