//! Cart flow against a running storefront.

#![allow(clippy::unwrap_used)]

use pizzeti_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let resp = TestContext::client()
        .get(ctx.storefront("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_adding_twice_merges_quantity_and_keeps_notes() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    let (product_id, price) = ctx.first_offer(&client, "juices").await;

    let resp = client
        .post(ctx.storefront("/cart/add"))
        .json(&json!({ "product_id": product_id, "quantity": 2, "notes": "بدون سكر" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = client
        .post(ctx.storefront("/cart/add"))
        .json(&json!({ "product_id": product_id, "quantity": 3 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 5);
    assert_eq!(cart["lines"][0]["notes"], "بدون سكر");
    assert_eq!(cart["total"], price * 5);

    let count: Value = client
        .get(ctx.storefront("/cart/count"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count["count"], 5);
}

#[tokio::test]
async fn test_quantity_floor_remove_and_clear() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    let (juice, _) = ctx.first_offer(&client, "juices").await;
    let (pizza, pizza_price) = ctx.first_offer(&client, "pizzas").await;

    for product_id in [&juice, &pizza] {
        client
            .post(ctx.storefront("/cart/add"))
            .json(&json!({ "product_id": product_id }))
            .send()
            .await
            .unwrap();
    }

    let cart: Value = client
        .post(ctx.storefront("/cart/update"))
        .json(&json!({ "index": 1, "quantity": -5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["lines"][1]["quantity"], 1);

    let cart: Value = client
        .post(ctx.storefront("/cart/remove"))
        .json(&json!({ "index": 0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["total"], pizza_price);

    let cart: Value = client
        .post(ctx.storefront("/cart/clear"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["total"], 0);
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let ctx = TestContext::new().await;
    let alice = TestContext::client();
    let bob = TestContext::client();
    let (product_id, _) = ctx.first_offer(&alice, "broast").await;

    alice
        .post(ctx.storefront("/cart/add"))
        .json(&json!({ "product_id": product_id }))
        .send()
        .await
        .unwrap();

    let cart: Value = bob
        .get(ctx.storefront("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cart["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_product_and_zero_quantity() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    let (product_id, _) = ctx.first_offer(&client, "juices").await;

    let resp = client
        .post(ctx.storefront("/cart/add"))
        .json(&json!({ "product_id": "عصائر:عصير غير موجود:1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .post(ctx.storefront("/cart/add"))
        .json(&json!({ "product_id": product_id, "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_and_profile_survive_restart() {
    let mut ctx = TestContext::new().await;
    let client = TestContext::client();
    let (juice, _) = ctx.first_offer(&client, "juices").await;
    let (pizza, _) = ctx.first_offer(&client, "pizzas").await;

    for product_id in [&juice, &pizza] {
        client
            .post(ctx.storefront("/cart/add"))
            .json(&json!({ "product_id": product_id }))
            .send()
            .await
            .unwrap();
    }
    let resp = client
        .post(ctx.storefront("/checkout"))
        .json(&json!({ "name": "Ali", "phone": "0912345678", "order_type": "pickup" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    client
        .post(ctx.storefront("/cart/add"))
        .json(&json!({ "product_id": juice, "quantity": 2 }))
        .send()
        .await
        .unwrap();

    ctx.restart_storefront().await;

    let cart: Value = client
        .get(ctx.storefront("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 2);

    let checkout: Value = client
        .get(ctx.storefront("/checkout"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(checkout["customer"]["name"], "Ali");
    assert_eq!(checkout["customer"]["phone"], "0912345678");
}
