//! End-to-end tests for the session-backed cart.

use axum::http::StatusCode;
use mockshop_integration_tests::TestContext;

fn add_form(id: &str, title: &str, price: &str) -> Vec<(&'static str, String)> {
    vec![
        ("id", id.to_string()),
        ("title", title.to_string()),
        ("price", price.to_string()),
        ("category", "Books".to_string()),
        ("description", "a description".to_string()),
    ]
}

#[tokio::test]
async fn test_empty_cart() {
    let ctx = TestContext::new(30).await;
    let (status, body) = ctx.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty"));

    let (_, count) = ctx.get("/cart/count").await;
    assert!(count.contains(">0</span>"));
}

#[tokio::test]
async fn test_adding_same_product_twice_merges_lines() {
    let ctx = TestContext::new(30).await;

    for _ in 0..2 {
        let resp = ctx
            .client
            .post(format!("{}/cart/add", ctx.base_url))
            .form(&add_form("4", "placeholder post 4", "120"))
            .send()
            .await
            .expect("add to cart failed");
        assert!(resp.status().is_success());
    }

    let (_, body) = ctx.get("/cart").await;
    assert!(body.contains("Cart (2 items)"));
    assert_eq!(body.matches("placeholder post 4").count(), 1);
    assert!(body.contains("<td>2</td>"));
    assert!(body.contains("$240"));
}

#[tokio::test]
async fn test_distinct_products_get_their_own_lines() {
    let ctx = TestContext::new(30).await;

    for (id, title) in [("1", "placeholder post 1"), ("2", "placeholder post 2")] {
        ctx.client
            .post(format!("{}/cart/add", ctx.base_url))
            .form(&add_form(id, title, "30"))
            .send()
            .await
            .expect("add to cart failed");
    }

    let (_, body) = ctx.get("/cart").await;
    assert!(body.contains("placeholder post 1"));
    assert!(body.contains("placeholder post 2"));
    assert!(body.contains("$60"));
}

#[tokio::test]
async fn test_htmx_add_returns_count_badge() {
    let ctx = TestContext::new(30).await;

    let resp = ctx
        .client
        .post(format!("{}/cart/add", ctx.base_url))
        .header("HX-Request", "true")
        .form(&add_form("9", "placeholder post 9", "55"))
        .send()
        .await
        .expect("add to cart failed");

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("HX-Trigger").and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("id=\"cart-count\""));
    assert!(body.contains(">1</span>"));
}

#[tokio::test]
async fn test_cart_is_per_visitor() {
    let ctx = TestContext::new(30).await;
    ctx.client
        .post(format!("{}/cart/add", ctx.base_url))
        .form(&add_form("3", "placeholder post 3", "80"))
        .send()
        .await
        .expect("add to cart failed");

    let stranger = reqwest::Client::new();
    let body = stranger
        .get(format!("{}/cart", ctx.base_url))
        .send()
        .await
        .expect("request failed")
        .text()
        .await
        .expect("Failed to read response");

    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_invalid_form_is_rejected() {
    let ctx = TestContext::new(30).await;
    let resp = ctx
        .client
        .post(format!("{}/cart/add", ctx.base_url))
        .form(&[("id", "x")])
        .send()
        .await
        .expect("request failed");

    assert!(resp.status().is_client_error());
}
