//! Cart route handlers.
//!
//! The add-to-cart form posts the product exactly as it was rendered, so the
//! stored line keeps the price and category the visitor saw, even if a later
//! page view derives different ones for the same id.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use mockshop_core::{Cart, CartItem, Category, ImageSize, Price, Product, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::services::CartStore;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.product.id.as_i32(),
            title: item.product.title.clone(),
            category: item.product.category.to_string(),
            image: item.product.image.clone(),
            quantity: item.quantity,
            price: item.product.price.to_string(),
            line_price: item.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().to_string(),
            item_count: cart.total_quantity(),
        }
    }
}

/// Add to cart form data: a snapshot of the product as displayed.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: i32,
    pub title: String,
    pub price: u32,
    pub category: Category,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl From<AddToCartForm> for Product {
    fn from(form: AddToCartForm) -> Self {
        let id = ProductId::new(form.id);
        Self {
            id,
            title: form.title,
            price: Price::whole_dollars(form.price),
            category: form.category,
            image: form
                .image
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| ImageSize::Card.url_for(id)),
            description: form.description,
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<impl IntoResponse> {
    let cart = CartStore::new(&session).load().await?;

    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add one unit of a product to the cart.
///
/// HTMX requests get the updated count badge plus a `cart-updated` trigger;
/// plain form posts are redirected to the cart page.
#[instrument(skip_all)]
pub async fn add(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = Product::from(form);
    let cart = CartStore::new(&session).add_to_cart(&product).await?;

    let product_id = product.id.to_string();
    let data = [("product_id", product_id.as_str())];
    add_breadcrumb("cart", "Added product to cart", Some(data.as_slice()));

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_quantity(),
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = CartStore::new(&session).load().await?;

    Ok(CartCountTemplate {
        count: cart.total_quantity(),
    })
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}
