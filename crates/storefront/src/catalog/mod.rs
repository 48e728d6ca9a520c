//! Mock catalog backed by a placeholder list API.
//!
//! # Architecture
//!
//! - The upstream resource is a generic list of `{id, title, body}` records,
//!   not a product API
//! - Raw records are cached in memory via `moka` (TTL from config)
//! - Products are re-derived from the records on every load, so prices and
//!   categories follow the configured [`AttributeMode`]
//!
//! # Example
//!
//! ```rust,ignore
//! use mockshop_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! // Listing: failures degrade to an empty collection
//! let products = client.load_products_or_empty().await;
//!
//! // Detail: `None` when the id is unknown or the load failed
//! let product = client.find_product(ProductId::new(3)).await;
//! ```
//!
//! [`AttributeMode`]: mockshop_core::AttributeMode

mod client;

pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when loading the catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
