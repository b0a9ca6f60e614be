//! Commands for the Session context.

use loadmart_core::command::Command;
use uuid::Uuid;

/// Command to log a user in and issue a token.
#[derive(Debug, Clone)]
pub struct Login {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Requested username; blank or missing logs in as guest.
    pub username: Option<String>,
}

impl Command for Login {
    fn command_type(&self) -> &'static str {
        "session.login"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
