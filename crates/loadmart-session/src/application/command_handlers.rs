//! Command handlers for the Session context.

use loadmart_core::clock::Clock;
use loadmart_core::command::Command;
use tracing::debug;

use crate::domain::commands::Login;
use crate::domain::session::{GUEST_USERNAME, Session};
use crate::store::SessionStore;

/// Handles the `Login` command: issues a token and records the session.
///
/// Login never fails; a blank or missing username logs in as guest.
pub fn handle_login(command: &Login, clock: &dyn Clock, sessions: &SessionStore) -> Session {
    let username = command
        .username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(GUEST_USERNAME)
        .to_owned();

    let session = Session {
        token: SessionStore::issue_token(),
        username,
        created_at: clock.now(),
    };
    sessions.insert(session.clone());

    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        username = %session.username,
        "session issued"
    );
    session
}
