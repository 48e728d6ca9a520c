//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /products
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (?q=&page=&view=grid|list)
//! GET  /products/results       - Listing results fragment (HTMX live search)
//! GET  /product/{id}           - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! GET  /cart/count             - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router,
    extract::Request,
    response::Redirect,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Directory static assets are served from.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/health", get(health))
        // Product routes
        .route("/products", get(products::index))
        .route("/products/results", get(products::results))
        .route("/product/{id}", get(products::show))
        // Cart routes
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/count", get(cart::count))
}

/// Build the full application: routes, static assets, sessions and tracing.
///
/// Error tracking layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog source.
async fn health() -> &'static str {
    "ok"
}
