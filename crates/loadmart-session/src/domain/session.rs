//! The session record.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Username assigned when a login does not name one.
pub const GUEST_USERNAME: &str = "guest";

/// A logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    /// User identity the token resolves to.
    pub username: String,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}
