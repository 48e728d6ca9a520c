//! Session-backed cart storage.
//!
//! The cart is kept as a serialized JSON array under one well-known session
//! key, the way a browser app would keep it in local storage. Every mutation
//! is a full read-modify-write of that value; there is no locking, so two
//! overlapping requests from the same browser can lose an update.

use tower_sessions::Session;
use tracing::instrument;

use mockshop_core::{Cart, CartError, Product};

use crate::models::session_keys;

/// Errors reading or writing the stored cart.
#[derive(Debug, thiserror::Error)]
pub enum CartStoreError {
    /// Session store failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Stored cart could not be parsed or serialized.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Cart persisted in the visitor's session.
pub struct CartStore<'a> {
    session: &'a Session,
}

impl<'a> CartStore<'a> {
    /// Wrap a session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Read the stored cart. A missing key is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the session cannot be read or the stored
    /// value is malformed.
    pub async fn load(&self) -> Result<Cart, CartStoreError> {
        let raw = self.session.get::<String>(session_keys::CART).await?;
        Ok(Cart::from_json(raw.as_deref())?)
    }

    /// Write the whole cart back under the cart key.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if serialization or the session write fails.
    pub async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let raw = cart.to_json()?;
        self.session.insert(session_keys::CART, raw).await?;
        Ok(())
    }

    /// Add one unit of a product and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the stored cart cannot be read or written.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: &Product) -> Result<Cart, CartStoreError> {
        let mut cart = self.load().await?;
        cart.add(product);
        self.save(&cart).await?;

        tracing::info!(
            lines = cart.len(),
            total_quantity = cart.total_quantity(),
            "added product to cart"
        );
        Ok(cart)
    }
}
