//! Fake user profiles for read-heavy load scenarios.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use loadmart_core::error::DomainError;
use serde::Serialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::latency::Endpoint;
use crate::routes::parse_path_id;
use crate::state::AppState;

/// Most orders a fake profile claims.
const MAX_FAKE_ORDERS: u32 = 50;

/// A generated user profile. Nothing here is stored.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    /// The requested id.
    pub id: u64,
    /// `user_{id}`.
    pub username: String,
    /// `user_{id}@example.com`.
    pub email: String,
    /// Fixed join date.
    pub joined: &'static str,
    /// Random order count.
    pub orders_count: u32,
}

/// GET /api/users/{id}
#[instrument(skip(state))]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let id: u64 = parse_path_id(&id)?;
    state.simulate(Endpoint::UserProfile).await?;
    let orders_count = state
        .shop
        .rng()
        .lock()
        .map_err(|_| DomainError::poisoned("rng"))?
        .next_u32_range(0, MAX_FAKE_ORDERS);

    Ok(Json(UserProfile {
        id,
        username: format!("user_{id}"),
        email: format!("user_{id}@example.com"),
        joined: "2024-01-01",
        orders_count,
    }))
}

/// Returns the router for fake user profiles. `/api/user/{id}` is kept as
/// an alias for older load scripts.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users/{id}", get(get_user))
        .route("/api/user/{id}", get(get_user))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::testing::test_state;

    async fn get(uri: &str) -> (StatusCode, Value) {
        let app = router().with_state(test_state());
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_get_user_builds_fake_profile() {
        // Act
        let (status, json) = get("/api/users/42").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["username"], "user_42");
        assert_eq!(json["email"], "user_42@example.com");
        assert_eq!(json["joined"], "2024-01-01");
        assert_eq!(json["orders_count"], 0);
    }

    #[tokio::test]
    async fn test_legacy_path_is_an_alias() {
        let (status, json) = get("/api/user/7").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], 7);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let (status, json) = get("/api/users/abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
    }
}
