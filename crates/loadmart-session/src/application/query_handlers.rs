//! Query handlers for the Session context.

use loadmart_core::error::DomainError;

use crate::store::SessionStore;

/// Resolves a token to the user identity it was issued for.
///
/// # Errors
///
/// Returns `DomainError::Unauthorized` for a missing or unknown token.
pub fn resolve_user(token: Option<&str>, sessions: &SessionStore) -> Result<String, DomainError> {
    token
        .and_then(|token| sessions.resolve(token))
        .map(|session| session.username)
        .ok_or(DomainError::Unauthorized)
}
