//! Remote menu endpoint against a running storefront.

#![allow(clippy::unwrap_used)]

use pizzeti_integration_tests::{TEST_PIN, TestContext};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_get_before_publish_is_null() {
    let ctx = TestContext::new().await;
    let body: Value = TestContext::client()
        .get(ctx.storefront("/api/menu"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "menu": null }));
}

#[tokio::test]
async fn test_publish_requires_pin() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    let body = json!({ "menu": { "juices": [] } });

    let resp = client
        .post(ctx.storefront("/api/menu"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: Value = resp.json().await.unwrap();
    assert_eq!(error["error"], "Unauthorized");

    let resp = client
        .post(ctx.storefront("/api/menu"))
        .header("x-admin-pin", "0000")
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_publish_rejects_non_object_menu() {
    let ctx = TestContext::new().await;
    let resp = TestContext::client()
        .post(ctx.storefront("/api/menu"))
        .header("x-admin-pin", TEST_PIN)
        .json(&json!({ "menu": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    let ctx = TestContext::new().await;
    let resp = TestContext::client()
        .put(ctx.storefront("/api/menu"))
        .json(&json!({ "menu": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()["allow"], "GET, POST");
}

#[tokio::test]
async fn test_publish_round_trips_and_reprices_menu() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    let menu = json!({ "juices": [{ "name": "ليمون", "price": 2500 }] });

    let resp = client
        .post(format!("{}?pin={TEST_PIN}", ctx.storefront("/api/menu")))
        .json(&json!({ "menu": menu }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ok: Value = resp.json().await.unwrap();
    assert_eq!(ok, json!({ "ok": true }));

    let body: Value = client
        .get(ctx.storefront("/api/menu"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["menu"], menu);

    // The storefront now sells the published juices
    let (product_id, price) = ctx.first_offer(&client, "juices").await;
    assert_eq!(price, 2500);
    assert!(product_id.contains("ليمون"));
}
