//! Routes for the Session bounded context.

use axum::body::Bytes;
use axum::extract::State;
use axum::{Json, Router, routing::post};
use loadmart_session::application::command_handlers;
use loadmart_session::domain::commands;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::latency::Endpoint;
use crate::routes::json_or_default;
use crate::state::AppState;

/// Request body for POST /login. The body itself is optional.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Requested username; guest when absent.
    pub username: Option<String>,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always `true`.
    pub success: bool,
    /// Token to send in the `Authorization` header.
    pub token: String,
    /// The logged-in user.
    pub username: String,
    /// Human-readable confirmation.
    pub message: &'static str,
}

/// POST /login
#[instrument(skip(state, body))]
async fn login(State(state): State<AppState>, body: Bytes) -> Result<Json<LoginResponse>, ApiError> {
    let request: LoginRequest = json_or_default(&body)?;
    state.simulate(Endpoint::Login).await?;

    let command = commands::Login {
        correlation_id: Uuid::new_v4(),
        username: request.username,
    };

    info!(correlation_id = %command.correlation_id, "handling login command");

    let session =
        command_handlers::handle_login(&command, state.shop.clock(), state.shop.sessions());

    Ok(Json(LoginResponse {
        success: true,
        token: session.token,
        username: session.username,
        message: "Login successful",
    }))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::testing::test_state;

    async fn post_login(app: Router, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_login_returns_token_for_named_user() {
        // Arrange
        let state = test_state();
        let app = router().with_state(state.clone());
        let body = serde_json::json!({ "username": "alice" });

        // Act
        let (status, json) =
            post_login(app, Body::from(serde_json::to_vec(&body).unwrap())).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["username"], "alice");
        let token = json["token"].as_str().unwrap();
        assert_eq!(
            state.shop.sessions().resolve(token).unwrap().username,
            "alice"
        );
    }

    #[tokio::test]
    async fn test_login_without_body_is_guest() {
        let app = router().with_state(test_state());

        let (status, json) = post_login(app, Body::empty()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["username"], "guest");
    }

    #[tokio::test]
    async fn test_login_with_malformed_body_returns_400() {
        let app = router().with_state(test_state());

        let (status, json) = post_login(app, Body::from("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
    }
}
