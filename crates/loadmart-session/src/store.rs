//! Token-keyed session store.

use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::session::Session;

const BEARER_PREFIX: &str = "Bearer ";

/// Every live session, keyed by token.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh, unguessable token.
    #[must_use]
    pub fn issue_token() -> String {
        format!("token_{}", Uuid::new_v4().simple())
    }

    /// Stores a session under its token.
    pub fn insert(&self, session: Session) {
        self.sessions.insert(session.token.clone(), session);
    }

    /// Looks a token up, accepting an optional `Bearer ` prefix.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
        self.sessions.get(token).map(|session| session.clone())
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no one is logged in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops every session.
    pub fn clear(&self) {
        self.sessions.clear();
    }
}
