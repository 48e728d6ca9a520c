//! HTTP client for the catalog source.

use std::sync::Arc;

use moka::future::Cache;
use tracing::{debug, instrument};
use url::Url;

use mockshop_core::catalog::derive_catalog;
use mockshop_core::{AttributeMode, Product, ProductId, SourceRecord};

use super::CatalogError;
use crate::config::CatalogConfig;

/// Longest slice of an upstream body kept in logs and errors.
const MAX_LOGGED_BODY: usize = 200;

/// Client for the placeholder list resource.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    source_url: Url,
    attributes: AttributeMode,
    cache: Option<Cache<(), Arc<Vec<SourceRecord>>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                source_url: config.source_url.clone(),
                attributes: config.attributes,
                cache,
            }),
        }
    }

    /// Fetch the raw source records, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, a non-success status or
    /// an undecodable body.
    #[instrument(skip(self), fields(url = %self.inner.source_url))]
    pub async fn fetch_source(&self) -> Result<Arc<Vec<SourceRecord>>, CatalogError> {
        if let Some(cache) = &self.inner.cache
            && let Some(records) = cache.get(&()).await
        {
            debug!(count = records.len(), "catalog source cache hit");
            return Ok(records);
        }

        let response = self
            .inner
            .client
            .get(self.inner.source_url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate_body(&body),
                "Catalog source returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let records: Vec<SourceRecord> = match serde_json::from_str(&body) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %truncate_body(&body),
                    "Failed to parse catalog source response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        let records = Arc::new(records);
        if let Some(cache) = &self.inner.cache {
            cache.insert((), Arc::clone(&records)).await;
        }

        debug!(count = records.len(), "fetched catalog source");
        Ok(records)
    }

    /// Fetch the source and derive the product collection.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the source cannot be fetched.
    pub async fn load_products(&self) -> Result<Vec<Product>, CatalogError> {
        let records = self.fetch_source().await?;
        Ok(derive_catalog(&records, self.inner.attributes))
    }

    /// Load the product collection, logging and swallowing any failure.
    ///
    /// A failed load yields an empty collection; there is no retry and no
    /// partial result.
    pub async fn load_products_or_empty(&self) -> Vec<Product> {
        match self.load_products().await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching products");
                Vec::new()
            }
        }
    }

    /// Load a fresh copy of the collection and find one product by id.
    ///
    /// Returns `None` when the id is not in the collection or the load failed.
    #[instrument(skip(self))]
    pub async fn find_product(&self, id: ProductId) -> Option<Product> {
        self.load_products_or_empty()
            .await
            .into_iter()
            .find(|product| product.id == id)
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_LOGGED_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).len(), MAX_LOGGED_BODY);
        assert_eq!(truncate_body("short"), "short");
    }
}
