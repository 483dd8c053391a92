//! In-process tests for the cart HTTP API.
//!
//! Drives the real router with `tower::ServiceExt::oneshot` over the
//! in-memory store, so the full boundary (deserialization, status codes,
//! JSON shapes) is exercised without a running server or database.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use paddock_cart::app;
use paddock_cart::config::CartConfig;
use paddock_cart::db::MemoryCartStore;
use paddock_cart::models::Product;
use paddock_cart::state::AppState;
use paddock_core::ProductId;

const USER: &str = "vasya@gmail.com";

fn test_config() -> CartConfig {
    CartConfig {
        database_url: secrecy::SecretString::from("postgres://localhost/unused"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

fn product(id: i64) -> Product {
    Product {
        id: ProductId::new(id),
        product_name: format!("Product {id}"),
        description: "A fine animal".to_owned(),
        price: Decimal::new(9500, 0),
        currency: "USD".to_owned(),
    }
}

async fn test_app(product_ids: &[i64]) -> Router {
    let store = Arc::new(MemoryCartStore::new());
    for &id in product_ids {
        store.insert_product(product(id)).await;
    }
    app(AppState::new(test_config(), store))
}

fn post_item(user_key: &str, product_id: i64, quantity: i32) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/cart/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "userKey": user_key,
                "productId": product_id,
                "quantity": quantity,
            })
            .to_string(),
        ))
        .unwrap()
}

fn get_cart(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = test_app(&[]).await;

    let response = app
        .clone()
        .oneshot(get_cart("/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_cart("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn add_then_list_shows_line() {
    let app = test_app(&[26]).await;

    let response = app.clone().oneshot(post_item(USER, 26, 2)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get_cart(&format!("/cart?userKey={USER}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["productId"], 26);
    assert_eq!(body["content"][0]["productName"], "Product 26");
    assert_eq!(body["content"][0]["quantity"], 2);
    assert_eq!(body["content"][0]["currency"], "USD");
}

#[tokio::test]
async fn paged_listing_reports_window_metadata() {
    let app = test_app(&(1..=10).collect::<Vec<_>>()).await;

    for id in 1..=10 {
        let response = app.clone().oneshot(post_item(USER, id, 1)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .oneshot(get_cart(&format!("/cart?userKey={USER}&page=0&size=5")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["numberOfElements"], 5);
    assert_eq!(body["first"], true);
    assert_eq!(body["last"], false);
    assert_eq!(body["totalElements"], 10);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["content"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn negative_delta_removes_line() {
    let app = test_app(&[26]).await;

    app.clone().oneshot(post_item(USER, 26, 2)).await.unwrap();
    let response = app.clone().oneshot(post_item(USER, 26, -2)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = body_json(
        app.oneshot(get_cart(&format!("/cart?userKey={USER}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["totalElements"], 0);
    assert_eq!(body["content"], json!([]));
}

#[tokio::test]
async fn zero_delta_is_accepted_and_inert() {
    let app = test_app(&[26]).await;

    let response = app.clone().oneshot(post_item(USER, 26, 0)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = body_json(
        app.oneshot(get_cart(&format!("/cart?userKey={USER}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["totalElements"], 0);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let app = test_app(&[26]).await;

    let response = app.oneshot(post_item(USER, 999, 1)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remove_endpoint_is_idempotent() {
    let app = test_app(&[26]).await;

    app.clone().oneshot(post_item(USER, 26, 2)).await.unwrap();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/cart/items/26?userKey={USER}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    // Removing a product that was never in the cart also succeeds.
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/cart/items/999?userKey={USER}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn clear_endpoint_empties_only_that_users_cart() {
    let app = test_app(&[1, 2]).await;

    app.clone().oneshot(post_item(USER, 1, 2)).await.unwrap();
    app.clone().oneshot(post_item(USER, 2, 1)).await.unwrap();
    app.clone()
        .oneshot(post_item("petya@gmail.com", 1, 5))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/cart?userKey={USER}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = body_json(
        app.clone()
            .oneshot(get_cart(&format!("/cart?userKey={USER}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["totalElements"], 0);

    let body = body_json(
        app.oneshot(get_cart("/cart?userKey=petya@gmail.com"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["totalElements"], 1);
}

#[tokio::test]
async fn zero_page_size_is_a_bad_request() {
    let app = test_app(&[]).await;

    let response = app
        .oneshot(get_cart(&format!("/cart?userKey={USER}&page=0&size=0")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_user_key_is_a_bad_request() {
    let app = test_app(&[]).await;

    let response = app
        .clone()
        .oneshot(get_cart("/cart"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get_cart("/cart?userKey="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn single_sided_paging_falls_back_to_unpaged() {
    let app = test_app(&[26]).await;
    app.clone().oneshot(post_item(USER, 26, 2)).await.unwrap();

    let response = app
        .oneshot(get_cart(&format!("/cart?userKey={USER}&page=0")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["first"], true);
    assert_eq!(body["last"], true);
}
