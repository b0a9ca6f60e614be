//! Integration tests for the Cart bounded context.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_cart_requires_a_session() {
    let (app, _) = common::build_test_app(&[5]);

    let (view_status, view) = common::get_json(app.clone(), "/api/cart", None).await;
    let (add_status, _) = common::post_json(
        app.clone(),
        "/api/cart/add",
        Some("token_forged"),
        &json!({ "product_id": 1 }),
    )
    .await;

    assert_eq!(view_status, StatusCode::UNAUTHORIZED);
    assert_eq!(view["error"], "unauthorized");
    assert_eq!(add_status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_add_then_view_cart() {
    // Arrange
    let (app, _) = common::build_test_app(&[5, 20]);
    let token = common::login(app.clone(), "alice").await;

    // Act
    let (status, added) = common::post_json(
        app.clone(),
        "/api/cart/add",
        Some(&token),
        &json!({ "product_id": 1, "quantity": 2 }),
    )
    .await;
    common::post_json(
        app.clone(),
        "/api/cart/add",
        Some(&token),
        &json!({ "product_id": 2 }),
    )
    .await;
    let (view_status, cart) = common::get_json(app, "/api/cart", Some(&token)).await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(added["cart_items"], 1);
    assert_eq!(view_status, StatusCode::OK);
    assert_eq!(cart["items_count"], 2);
    assert_eq!(cart["cart"][1]["quantity"], 1);
    assert_eq!(cart["total"], 37.5);
}

#[tokio::test]
async fn test_cumulative_overflow_is_blocked() {
    // Arrange
    let (app, shop) = common::build_test_app(&[5]);
    let token = common::login(app.clone(), "alice").await;
    let add = json!({ "product_id": 1, "quantity": 3 });
    common::post_json(app.clone(), "/api/cart/add", Some(&token), &add).await;

    // Act
    let (status, json) = common::post_json(app, "/api/cart/add", Some(&token), &add).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "insufficient_stock");
    assert_eq!(json["requested"], 6);
    assert_eq!(json["available"], 5);
    assert_eq!(shop.carts().blocked_attempts(), 1);
    assert_eq!(shop.carts().cart("alice").quantity_of(1), 3);
}

#[tokio::test]
async fn test_add_rejects_zero_quantity_and_unknown_product() {
    let (app, _) = common::build_test_app(&[5]);
    let token = common::login(app.clone(), "alice").await;

    let (zero, _) = common::post_json(
        app.clone(),
        "/api/cart/add",
        Some(&token),
        &json!({ "product_id": 1, "quantity": 0 }),
    )
    .await;
    let (unknown, _) = common::post_json(
        app,
        "/api/cart/add",
        Some(&token),
        &json!({ "product_id": 42 }),
    )
    .await;

    assert_eq!(zero, StatusCode::BAD_REQUEST);
    assert_eq!(unknown, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_add_requests_return_invalid_input() {
    // Arrange
    let (app, shop) = common::build_test_app(&[5]);
    let token = common::login(app.clone(), "alice").await;

    // Act
    let (missing_id, missing_json) = common::post_json(
        app.clone(),
        "/api/cart/add",
        Some(&token),
        &json!({ "quantity": 2 }),
    )
    .await;
    let (negative, negative_json) = common::post_json(
        app.clone(),
        "/api/cart/add",
        Some(&token),
        &json!({ "product_id": 1, "quantity": -1 }),
    )
    .await;
    let (empty, empty_json) =
        common::post_raw(app.clone(), "/api/cart/add", Some(&token), "").await;
    let (garbled, garbled_json) =
        common::post_raw(app, "/api/cart/add", Some(&token), "{product_id: 1").await;

    // Assert
    for (status, json) in [
        (missing_id, missing_json),
        (negative, negative_json),
        (empty, empty_json),
        (garbled, garbled_json),
    ] {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
    }
    assert!(shop.carts().cart("alice").is_empty());
    assert_eq!(shop.carts().blocked_attempts(), 0);
}

#[tokio::test]
async fn test_add_accepts_json_without_content_type() {
    let (app, shop) = common::build_test_app(&[5]);
    let token = common::login(app.clone(), "alice").await;

    let (status, json) = common::post_raw(
        app,
        "/api/cart/add",
        Some(&token),
        r#"{"product_id": 1, "quantity": 2}"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["cart_items"], 1);
    assert_eq!(shop.carts().cart("alice").quantity_of(1), 2);
}
