//! Integration tests for the Catalog bounded context.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_list_products_pages_in_creation_order() {
    let (app, _) = common::build_test_app(&[5; 30]);

    let (status, json) = common::get_json(app, "/api/products?page=2&per_page=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["page"], 2);
    assert_eq!(json["per_page"], 10);
    assert_eq!(json["total"], 30);
    let products = json["products"].as_array().unwrap();
    assert_eq!(products.len(), 10);
    assert_eq!(products[0]["id"], 11);
}

#[tokio::test]
async fn test_list_products_defaults_and_caps_page_size() {
    let (app, _) = common::build_test_app(&[5; 150]);

    let (_, defaults) = common::get_json(app.clone(), "/api/products", None).await;
    let (_, capped) = common::get_json(app, "/api/products?per_page=500", None).await;

    assert_eq!(defaults["page"], 1);
    assert_eq!(defaults["products"].as_array().unwrap().len(), 20);
    assert_eq!(capped["per_page"], 100);
    assert_eq!(capped["products"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_list_products_rejects_page_zero() {
    let (app, _) = common::build_test_app(&[5]);

    let (status, json) = common::get_json(app, "/api/products?page=0", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");
}

#[tokio::test]
async fn test_get_product_reports_status() {
    let (app, _) = common::build_test_app(&[0, 7, 40]);

    let (_, out) = common::get_json(app.clone(), "/api/products/1", None).await;
    let (_, low) = common::get_json(app.clone(), "/api/products/2", None).await;
    let (status, plenty) = common::get_json(app, "/api/products/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["available"], false);
    assert_eq!(out["status"], "Out of Stock");
    assert_eq!(low["status"], "Low Stock");
    assert_eq!(plenty["status"], "In Stock");
    assert_eq!(plenty["price"], 12.5);
    assert_eq!(plenty["stock_level"], "in_stock");
}

#[tokio::test]
async fn test_get_unknown_product_returns_404() {
    let (app, _) = common::build_test_app(&[5]);

    let (status, json) = common::get_json(app, "/api/products/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_search_matches_category_and_skips_sold_out() {
    // Categories cycle Electronics, Clothing, Books, Home.
    let (app, _) = common::build_test_app(&[5, 5, 0, 5, 5, 5, 9]);

    let (status, json) = common::get_json(app.clone(), "/api/search?q=BOOKS", None).await;
    let (_, all) =
        common::get_json(app, "/api/search?q=books&in_stock_only=false", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "books");
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["id"], 7);
    assert_eq!(all["count"], 2);
}

#[tokio::test]
async fn test_search_truncates_to_twenty_results() {
    let (app, _) = common::build_test_app(&[5; 45]);

    let (_, json) = common::get_json(app, "/api/search?q=product", None).await;

    assert_eq!(json["count"], 45);
    assert_eq!(json["results"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_search_without_query_returns_400() {
    let (app, _) = common::build_test_app(&[5]);

    let (status, json) = common::get_json(app, "/api/search", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");
}

#[tokio::test]
async fn test_malformed_product_requests_return_invalid_input() {
    let (app, _) = common::build_test_app(&[5]);

    let (bad_id, bad_id_json) = common::get_json(app.clone(), "/api/products/abc", None).await;
    let (bad_page, bad_page_json) =
        common::get_json(app.clone(), "/api/products?page=abc", None).await;
    let (bad_flag, bad_flag_json) =
        common::get_json(app, "/api/search?q=product&in_stock_only=maybe", None).await;

    for (status, json) in [
        (bad_id, bad_id_json),
        (bad_page, bad_page_json),
        (bad_flag, bad_flag_json),
    ] {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
    }
}
