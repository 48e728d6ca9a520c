//! Cart line items and the add-to-cart merge.
//!
//! A cart is an ordered list of line items, unique by product id, stored as a
//! JSON array under [`CART_STORAGE_KEY`]. Each line carries a snapshot of the
//! product as it was shown when it was first added, so a later page view of the
//! same id may show a different price than the cart does.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Storage key the serialized cart lives under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors reading or writing a serialized cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// Stored cart is not a valid JSON array of line items.
    #[error("malformed stored cart: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A product in the cart with its quantity.
///
/// Serialized flat: the product fields and `quantity` share one JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// An ordered collection of cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Parse a stored cart. An absent value is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Malformed` if the stored value is not valid JSON.
    pub fn from_json(raw: Option<&str>) -> Result<Self, CartError> {
        raw.map_or_else(
            || Ok(Self::new()),
            |raw| serde_json::from_str(raw).map_err(CartError::Malformed),
        )
    }

    /// Serialize the whole cart for storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String, CartError> {
        serde_json::to_string(self).map_err(CartError::Serialize)
    }

    /// Add one unit of a product.
    ///
    /// An existing line with the same id gets its quantity bumped by one and
    /// keeps its original snapshot. Otherwise a new line with quantity 1 is
    /// appended.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.item_mut(product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == id)
    }

    fn item_mut(&mut self, id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.product.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn product(id: i32, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("product {id}"),
            price: Price::whole_dollars(price),
            category: Category::Books,
            image: format!("https://picsum.photos/300/200?random={id}"),
            description: "body".to_string(),
        }
    }

    #[test]
    fn test_absent_is_empty() {
        let cart = Cart::from_json(None).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_malformed_is_error() {
        let err = Cart::from_json(Some("{not json")).unwrap_err();
        assert!(matches!(err, CartError::Malformed(_)));
    }

    #[test]
    fn test_same_id_twice_merges() {
        let mut cart = Cart::new();
        cart.add(&product(1, 30));
        cart.add(&product(1, 30));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_distinct_ids_append_in_order() {
        let mut cart = Cart::new();
        cart.add(&product(2, 30));
        cart.add(&product(1, 40));
        let ids: Vec<i32> = cart.items().iter().map(|i| i.product.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_repeat_add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add(&product(1, 30));
        cart.add(&product(1, 99));
        let item = cart.item(ProductId::new(1)).unwrap();
        assert_eq!(item.product.price, Price::whole_dollars(30));
        assert_eq!(item.line_total(), Price::whole_dollars(60));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(&product(1, 30));
        cart.add(&product(1, 30));
        cart.add(&product(2, 45));
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Price::whole_dollars(105));
    }

    #[test]
    fn test_stored_form_survives_reload() {
        let mut cart = Cart::new();
        cart.add(&product(7, 120));
        cart.add(&product(7, 120));
        let stored = cart.to_json().unwrap();
        let reloaded = Cart::from_json(Some(&stored)).unwrap();
        assert_eq!(reloaded, cart);
    }

    #[test]
    fn test_stored_form_is_flat_array() {
        let mut cart = Cart::new();
        cart.add(&product(3, 20));
        let value: serde_json::Value = serde_json::from_str(&cart.to_json().unwrap()).unwrap();
        let line = value.as_array().and_then(|lines| lines.first()).unwrap();
        assert_eq!(line["id"], 3);
        assert_eq!(line["price"], 20);
        assert_eq!(line["quantity"], 1);
        assert_eq!(line["category"], "Books");
    }
}
