//! Integration tests for the Checkout bounded context.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use loadmart_test_support::DecliningPaymentGateway;
use serde_json::json;

async fn add(app: axum::Router, token: &str, product_id: u32, quantity: u32) {
    let (status, _) = common::post_json(
        app,
        "/api/cart/add",
        Some(token),
        &json!({ "product_id": product_id, "quantity": quantity }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_checkout_places_order_and_reduces_stock() {
    // Arrange
    let (app, shop) = common::build_test_app(&[5]);
    let token = common::login(app.clone(), "alice").await;
    add(app.clone(), &token, 1, 3).await;

    // Act
    let (status, json) = common::post_json(
        app.clone(),
        "/api/checkout",
        Some(&token),
        &json!({ "shipping_address": "1 Main St" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["order_id"].as_str().unwrap().starts_with("ORD-"));
    assert_eq!(json["total"], 37.5);
    assert_eq!(json["items_purchased"], 1);
    assert_eq!(json["payment_method"], "credit_card");
    assert_eq!(json["shipping_address"], "1 Main St");
    assert_eq!(json["estimated_delivery"], "3-5 business days");

    let (_, product) = common::get_json(app.clone(), "/api/products/1", None).await;
    assert_eq!(product["stock"], 2);
    assert_eq!(product["times_purchased"], 1);
    let (_, cart) = common::get_json(app, "/api/cart", Some(&token)).await;
    assert_eq!(cart["items_count"], 0);
    assert_eq!(shop.orders().len().unwrap(), 1);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_returns_400() {
    let (app, _) = common::build_test_app(&[5]);
    let token = common::login(app.clone(), "alice").await;

    let (status, json) = common::post_json(app, "/api/checkout", Some(&token), &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "empty_cart");
}

#[tokio::test]
async fn test_checkout_without_token_returns_401() {
    let (app, _) = common::build_test_app(&[5]);

    let (status, json) = common::post_json(app, "/api/checkout", None, &json!({})).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn test_checkout_after_stock_sold_elsewhere_returns_400() {
    // Arrange
    let (app, _) = common::build_test_app(&[2]);
    let alice = common::login(app.clone(), "alice").await;
    let bob = common::login(app.clone(), "bob").await;
    add(app.clone(), &alice, 1, 2).await;
    add(app.clone(), &bob, 1, 2).await;
    common::post_json(app.clone(), "/api/checkout", Some(&alice), &json!({})).await;

    // Act
    let (status, json) = common::post_json(app, "/api/checkout", Some(&bob), &json!({})).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "insufficient_stock");
    assert_eq!(json["available"], 0);
}

#[tokio::test]
async fn test_declined_payment_returns_502_and_restores_stock() {
    // Arrange
    let (app, shop) =
        common::build_test_app_with_payments(&[4], Arc::new(DecliningPaymentGateway));
    let token = common::login(app.clone(), "alice").await;
    add(app.clone(), &token, 1, 4).await;

    // Act
    let (status, json) = common::post_json(app.clone(), "/api/checkout", Some(&token), &json!({})).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "payment_failed");
    let (_, product) = common::get_json(app, "/api/products/1", None).await;
    assert_eq!(product["stock"], 4);
    assert_eq!(shop.carts().cart("alice").quantity_of(1), 4);
    assert_eq!(shop.orders().len().unwrap(), 0);
}
