//! Session token extractors.
//!
//! Clients send the token from `POST /api/auth/login` in the
//! `Authorization` header, with or without a `Bearer ` prefix.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use loadmart_session::application::query_handlers::resolve_user;

use crate::error::ApiError;
use crate::state::AppState;

/// The raw `Authorization` header value, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub Option<String>);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        Ok(Self(token))
    }
}

/// Extractor that requires a logged-in user.
///
/// Rejects with `401 unauthorized` when the token is missing or unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// The user the token resolves to.
    pub username: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = match SessionToken::from_request_parts(parts, state).await {
            Ok(token) => token,
            Err(never) => match never {},
        };
        let username = resolve_user(token.as_deref(), state.shop.sessions())?;
        Ok(Self { username })
    }
}
