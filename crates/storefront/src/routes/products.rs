//! Product route handlers.
//!
//! The listing and the detail page each load their own copy of the mock
//! catalog; nothing is shared between them, so with fresh attributes the
//! same product can show a different price on each page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use url::form_urlencoded;

use mockshop_core::listing::filter_products;
use mockshop_core::{ImageSize, Page, Product, ProductId, ViewMode};

use crate::filters;
use crate::state::AppState;

const CARD_TITLE_CHARS: usize = 50;
const GRID_DESCRIPTION_CHARS: usize = 100;
const LIST_DESCRIPTION_CHARS: usize = 150;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub short_title: String,
    pub price: String,
    /// Whole-dollar price, posted back with add-to-cart.
    pub price_value: u32,
    pub category: String,
    pub image: String,
    pub hero_image: String,
    pub description: String,
    pub grid_description: String,
    pub list_description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            short_title: ellipsize(&product.title, CARD_TITLE_CHARS),
            price: product.price.to_string(),
            price_value: product.whole_price(),
            category: product.category.to_string(),
            image: product.image.clone(),
            hero_image: product.image_url(ImageSize::Hero),
            description: product.description.clone(),
            grid_description: ellipsize(&product.description, GRID_DESCRIPTION_CHARS),
            list_description: ellipsize(&product.description, LIST_DESCRIPTION_CHARS),
        }
    }
}

/// A numbered link in the pager.
#[derive(Clone)]
pub struct PageLink {
    pub number: usize,
    pub url: String,
    pub is_current: bool,
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    /// Search term.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    /// Layout.
    pub view: Option<ViewMode>,
}

impl ListingQuery {
    fn term(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Everything the listing templates render.
#[derive(Clone)]
pub struct ListingView {
    pub query: String,
    pub view: ViewMode,
    pub products: Vec<ProductView>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub first_index: usize,
    pub last_index: usize,
    pub is_paginated: bool,
    pub page_links: Vec<PageLink>,
    pub first_url: String,
    pub last_url: String,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
    pub grid_url: String,
    pub list_url: String,
}

impl ListingView {
    /// Filter, paginate and prepare a product collection for rendering.
    #[must_use]
    pub fn build(products: &[Product], query: &ListingQuery) -> Self {
        let term = query.term();
        let view = query.view.unwrap_or_default();
        let filtered = filter_products(products, term);
        let page = Page::new(filtered, query.page.unwrap_or(1));

        let page_url = |number: usize| listing_url(term, number, view);
        let page_links = page
            .page_numbers()
            .into_iter()
            .map(|number| PageLink {
                number,
                url: page_url(number),
                is_current: number == page.number,
            })
            .collect();

        Self {
            query: term.to_string(),
            view,
            products: page.items.iter().map(|p| ProductView::from(*p)).collect(),
            current_page: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
            first_index: page.first_index(),
            last_index: page.last_index(),
            is_paginated: page.is_paginated(),
            page_links,
            first_url: page_url(1),
            last_url: page_url(page.total_pages.max(1)),
            previous_url: page.has_previous().then(|| page_url(page.number - 1)),
            next_url: page.has_next().then(|| page_url(page.number + 1)),
            grid_url: listing_url(term, page.number, ViewMode::Grid),
            list_url: listing_url(term, page.number, ViewMode::List),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub listing: ListingView,
}

/// Listing results fragment template (for HTMX live search).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_results.html")]
pub struct ProductResultsTemplate {
    pub listing: ListingView,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

/// Product not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub requested: String,
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let products = state.catalog().load_products_or_empty().await;

    ProductsIndexTemplate {
        listing: ListingView::build(&products, &query),
    }
}

/// Display listing results fragment (for HTMX).
///
/// The search form never sends a page number, so a new term always lands on
/// page 1.
#[instrument(skip(state))]
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let products = state.catalog().load_products_or_empty().await;

    ProductResultsTemplate {
        listing: ListingView::build(&products, &query),
    }
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let product = match raw_id.parse::<ProductId>() {
        Ok(id) => state.catalog().find_product(id).await,
        Err(_) => None,
    };

    match product {
        Some(product) => ProductShowTemplate {
            product: ProductView::from(&product),
        }
        .into_response(),
        None => {
            tracing::info!(id = %raw_id, "product not found");
            (
                StatusCode::NOT_FOUND,
                ProductNotFoundTemplate { requested: raw_id },
            )
                .into_response()
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Shorten `text` to `max` characters, appending `...` when cut.
fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Listing URL preserving the search term and layout.
fn listing_url(term: &str, page: usize, view: ViewMode) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !term.is_empty() {
        query.append_pair("q", term);
    }
    query.append_pair("page", &page.to_string());
    query.append_pair("view", view.as_str());
    format!("/products?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use mockshop_core::{Category, Price};

    use super::*;

    fn catalog(count: i32) -> Vec<Product> {
        (1..=count)
            .map(|id| Product {
                id: ProductId::new(id),
                title: format!("title {id}"),
                price: Price::whole_dollars(20 + u32::try_from(id).unwrap_or(0)),
                category: Category::from_index(usize::try_from(id).unwrap_or(0)),
                image: format!("https://picsum.photos/300/200?random={id}"),
                description: "d".repeat(200),
            })
            .collect()
    }

    fn query(q: Option<&str>, page: Option<usize>, view: Option<ViewMode>) -> ListingQuery {
        ListingQuery {
            q: q.map(String::from),
            page,
            view,
        }
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 50), "short");
        assert_eq!(ellipsize("abcdef", 3), "abc...");
        assert_eq!(ellipsize("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_listing_url_preserves_term_and_view() {
        assert_eq!(
            listing_url("home goods", 2, ViewMode::List),
            "/products?q=home+goods&page=2&view=list"
        );
        assert_eq!(listing_url("", 1, ViewMode::Grid), "/products?page=1&view=grid");
    }

    #[test]
    fn test_build_first_page() {
        let listing = ListingView::build(&catalog(24), &ListingQuery::default());
        assert_eq!(listing.products.len(), 6);
        assert_eq!(listing.total_items, 24);
        assert_eq!(listing.total_pages, 4);
        assert_eq!(listing.first_index, 1);
        assert_eq!(listing.last_index, 6);
        assert!(listing.is_paginated);
        assert!(listing.previous_url.is_none());
        assert_eq!(
            listing.next_url.as_deref(),
            Some("/products?page=2&view=grid")
        );
        assert!(listing.view.is_grid());
    }

    #[test]
    fn test_build_last_page() {
        let listing = ListingView::build(&catalog(14), &query(None, Some(3), None));
        assert_eq!(listing.products.len(), 2);
        assert_eq!(listing.first_index, 13);
        assert_eq!(listing.last_index, 14);
        assert!(listing.next_url.is_none());
        assert!(listing.page_links.iter().any(|l| l.number == 3 && l.is_current));
    }

    #[test]
    fn test_build_filters_by_category() {
        let listing = ListingView::build(&catalog(24), &query(Some("Books"), None, None));
        assert_eq!(listing.total_items, 6);
        assert!(listing.products.iter().all(|p| p.category == "Books"));
        assert!(!listing.is_paginated);
    }

    #[test]
    fn test_build_no_results() {
        let listing = ListingView::build(&catalog(24), &query(Some("zzz"), None, None));
        assert!(listing.products.is_empty());
        assert_eq!(listing.total_pages, 0);
        assert!(!listing.is_paginated);
    }

    #[test]
    fn test_view_toggle_keeps_page_and_term() {
        let listing = ListingView::build(
            &catalog(24),
            &query(Some("title"), Some(2), Some(ViewMode::List)),
        );
        assert!(listing.view.is_list());
        assert_eq!(listing.grid_url, "/products?q=title&page=2&view=grid");
        assert_eq!(listing.list_url, "/products?q=title&page=2&view=list");
    }

    #[test]
    fn test_product_view_truncates() {
        let product = catalog(1).remove(0);
        let view = ProductView::from(&product);
        assert_eq!(view.grid_description.chars().count(), 103);
        assert_eq!(view.list_description.chars().count(), 153);
        assert_eq!(view.hero_image, "https://picsum.photos/600/400?random=1");
        assert_eq!(view.price, "$21");
        assert_eq!(view.price_value, 21);
    }
}
