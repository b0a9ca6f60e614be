//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use loadmart_catalog::domain::catalog::Catalog;
use loadmart_catalog::domain::product::{Category, Product};
use loadmart_checkout::shop::{Shop, ShopConfig, ShopDeps};
use loadmart_core::payment::PaymentGateway;
use loadmart_test_support::{ApprovingPaymentGateway, FixedClock, MockRng};
use rust_decimal::Decimal;
use tower::ServiceExt;

use loadmart_api::latency::SimulatedLatency;
use loadmart_api::routes;
use loadmart_api::state::AppState;

/// Price of every test product, in cents.
pub const PRICE_CENTS: i64 = 1250;

/// Build the full app router over products with the given stocks (ids
/// `1..=N`, each priced 12.50) and an approving payment gateway.
pub fn build_test_app(stocks: &[u32]) -> (Router, Arc<Shop>) {
    build_test_app_with_payments(stocks, Arc::new(ApprovingPaymentGateway))
}

/// Build the full app router with a custom payment gateway. Uses the same
/// route structure as `main.rs`, without latency.
pub fn build_test_app_with_payments(
    stocks: &[u32],
    payments: Arc<dyn PaymentGateway>,
) -> (Router, Arc<Shop>) {
    let products = (1..)
        .zip(stocks)
        .map(|(id, &stock)| {
            let category = Category::ALL[(id as usize - 1) % Category::ALL.len()];
            Product::new(
                id,
                format!("Product {id}"),
                Decimal::new(PRICE_CENTS, 2),
                category,
                stock,
            )
        })
        .collect();
    let shop = Arc::new(Shop::with_catalog(
        Catalog::from_products(products).unwrap(),
        ShopConfig::default(),
        ShopDeps {
            clock: Arc::new(FixedClock::default()),
            rng: Arc::new(Mutex::new(MockRng)),
            payments,
        },
    ));
    let app_state = AppState::new(Arc::clone(&shop), SimulatedLatency::new(false));

    (routes::router().with_state(app_state), shop)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and an optional token.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a raw body and no content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: &'static str,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).unwrap();

    send(app, request).await
}

/// Send a GET request with an optional token.
pub async fn get_json(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    let request = builder.body(Body::empty()).unwrap();

    send(app, request).await
}

/// Log in and return the issued token.
pub async fn login(app: Router, username: &str) -> String {
    let (status, json) = post_json(
        app,
        "/api/auth/login",
        None,
        &serde_json::json!({ "username": username }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["token"].as_str().unwrap().to_owned()
}
