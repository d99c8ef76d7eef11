//! Checkout against a running storefront.

#![allow(clippy::unwrap_used)]

use pizzeti_integration_tests::TestContext;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn add_first_juice(ctx: &TestContext, client: &Client) -> u64 {
    let (product_id, price) = ctx.first_offer(client, "juices").await;
    let resp = client
        .post(ctx.storefront("/cart/add"))
        .json(&json!({ "product_id": product_id, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    price * 2
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let ctx = TestContext::new().await;
    let resp = TestContext::client()
        .post(ctx.storefront("/checkout"))
        .json(&json!({ "name": "Ali", "phone": "0912345678", "order_type": "pickup" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_form_reports_each_field() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    add_first_juice(&ctx, &client).await;

    let resp = client
        .post(ctx.storefront("/checkout"))
        .json(&json!({ "name": "", "phone": "123", "order_type": "delivery", "area": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"]["name"]["code"], "required");
    assert_eq!(body["errors"]["phone"]["code"], "invalid_format");
    assert_eq!(body["errors"]["area"]["code"], "required");

    // The cart survives a failed submission
    let count: Value = client
        .get(ctx.storefront("/cart/count"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count["count"], 2);
}

#[tokio::test]
async fn test_successful_checkout_clears_cart_and_remembers_customer() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    let total = add_first_juice(&ctx, &client).await;

    let resp = client
        .post(ctx.storefront("/checkout"))
        .json(&json!({
            "name": "Ali",
            "phone": "+249 900-318100",
            "order_type": "pickup",
            "area": "الخرطوم",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let order: Value = resp.json().await.unwrap();
    assert_eq!(order["total"], total);
    assert_eq!(order["customer"]["phone"], "249900318100");
    assert_eq!(order["customer"]["area"], "");
    assert!(
        order["whatsapp_url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/249900318100?text=")
    );
    assert!(order["message"].as_str().unwrap().contains("× 2"));

    let cart: Value = client
        .get(ctx.storefront("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cart["lines"].as_array().unwrap().is_empty());

    let checkout: Value = client
        .get(ctx.storefront("/checkout"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(checkout["customer"]["name"], "Ali");
    assert_eq!(checkout["customer"]["phone"], "249900318100");
    assert_eq!(checkout["customer"]["order_type"], "pickup");
}
