//! End-to-end tests for the product listing and detail pages.

use axum::http::StatusCode;
use mockshop_integration_tests::{TestContext, UNIQUE_TITLE, first_price, spawn_source};

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_root_redirects_to_listing() {
    let ctx = TestContext::new(30).await;
    let (status, body) = ctx.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Products (24 items)"));
}

#[tokio::test]
async fn test_listing_uses_first_24_records() {
    let ctx = TestContext::new(100).await;
    let (status, body) = ctx.get("/products").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Products (24 items)"));
    assert!(body.contains("Showing 1-6 of 24 products"));
    assert!(body.contains("placeholder post 1"));
    assert!(!body.contains("placeholder post 25"));
}

#[tokio::test]
async fn test_listing_last_page() {
    let ctx = TestContext::new(30).await;
    let (_, body) = ctx.get("/products?page=4").await;

    assert!(body.contains("Showing 19-24 of 24 products"));
    assert!(body.contains("placeholder post 24"));
    assert!(!body.contains("placeholder post 18"));
}

#[tokio::test]
async fn test_page_past_end_shows_last_page() {
    let ctx = TestContext::new(30).await;

    for page in ["9", "18446744073709551615"] {
        let (status, body) = ctx.get(&format!("/products?page={page}")).await;
        assert_eq!(status, StatusCode::OK, "page {page}");
        assert!(body.contains("Showing 19-24 of 24 products"), "page {page}");
        assert!(body.contains("placeholder post 24"), "page {page}");
    }
}

#[tokio::test]
async fn test_search_matches_title_case_insensitively() {
    let ctx = TestContext::new(30).await;
    let (_, body) = ctx.get("/products?q=SUNFLOWER").await;

    assert!(body.contains("Products (1 items)"));
    assert!(body.contains(UNIQUE_TITLE));
    // One page only, so no pager
    assert!(!body.contains("Showing 1-1"));
}

#[tokio::test]
async fn test_search_results_fragment() {
    let ctx = TestContext::new(30).await;
    let (status, body) = ctx.get("/products/results?q=sunflower&view=list").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<html"));
    assert!(body.contains("product-list"));
    assert!(body.contains(UNIQUE_TITLE));
}

#[tokio::test]
async fn test_search_with_no_hits() {
    let ctx = TestContext::new(30).await;
    let (_, body) = ctx.get("/products?q=zzzz").await;

    assert!(body.contains("Products (0 items)"));
    assert!(body.contains("No products found"));
}

#[tokio::test]
async fn test_list_view_toggle() {
    let ctx = TestContext::new(30).await;
    let (_, body) = ctx.get("/products?view=list&page=2").await;

    assert!(body.contains("product-list"));
    assert!(!body.contains("product-grid"));
    assert!(body.contains("/products?page=2&amp;view=grid"));
}

#[tokio::test]
async fn test_upstream_failure_renders_empty_listing() {
    let ctx = TestContext::failing_upstream().await;
    let (status, body) = ctx.get("/products").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Products (0 items)"));
    assert!(body.contains("No products found"));
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_product_detail() {
    let ctx = TestContext::new(30).await;
    let (status, body) = ctx.get("/product/3").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("placeholder post 3"));
    assert!(body.contains("https://picsum.photos/600/400?random=3"));
    assert!(body.contains("Back to Products"));
    assert!(body.contains("Add to Cart"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let ctx = TestContext::new(30).await;

    // Record 25 exists upstream but is outside the catalog
    for path in ["/product/25", "/product/abc", "/product/-1"] {
        let (status, body) = ctx.get(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert!(body.contains("Product not found"), "{path}");
        assert!(body.contains("Back to Products"), "{path}");
    }
}

#[tokio::test]
async fn test_detail_when_upstream_fails() {
    let ctx = TestContext::failing_upstream().await;
    let (status, body) = ctx.get("/product/1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product not found"));
}

#[tokio::test]
async fn test_seeded_catalog_is_stable_across_views() {
    let upstream = spawn_source(30).await;
    let ctx = TestContext::with_source(&upstream, &[("CATALOG_SEED", "42")]).await;

    let (_, first) = ctx.get("/product/5").await;
    let (_, second) = ctx.get("/product/5").await;

    let price = first_price(&first).expect("detail shows a price");
    assert!(price.starts_with('$'));
    assert_eq!(Some(price), first_price(&second));
}
