//! Mock product derivation.
//!
//! The catalog has no product source of its own. It borrows a generic list
//! resource (records with `id`, `title` and `body`) and dresses the first
//! [`CATALOG_SIZE`] records up as products: identity and text come from the
//! record, price and category are drawn at random.
//!
//! # Example
//!
//! ```rust
//! use mockshop_core::catalog::{SourceRecord, derive_products};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let records = vec![SourceRecord {
//!     id: 1,
//!     title: "sunt aut facere".to_string(),
//!     body: "quia et suscipit".to_string(),
//! }];
//!
//! let products = derive_products(&records, &mut StdRng::seed_from_u64(7));
//! assert_eq!(products.len(), 1);
//! assert!((20..=519).contains(&products[0].whole_price()));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, ProductId};

/// Number of source records turned into products.
pub const CATALOG_SIZE: usize = 24;

/// Lowest price a mock product can get.
pub const MIN_PRICE: u32 = 20;

/// Width of the price range; prices fall in `MIN_PRICE..MIN_PRICE + PRICE_SPREAD`.
pub const PRICE_SPREAD: u32 = 500;

/// A record from the placeholder list resource.
///
/// Only the fields the catalog consumes are decoded; anything else in the
/// upstream payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: i32,
    pub title: String,
    pub body: String,
}

/// A synthetic catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub category: Category,
    /// Card-sized image URL, see [`ImageSize::Card`].
    pub image: String,
    pub description: String,
}

impl Product {
    /// Image URL for this product at the given size.
    #[must_use]
    pub fn image_url(&self, size: ImageSize) -> String {
        size.url_for(self.id)
    }

    /// The price as a whole-dollar integer (derived prices never have cents).
    #[must_use]
    pub fn whole_price(&self) -> u32 {
        self.price.amount().trunc().to_u32().unwrap_or(0)
    }
}

/// Placeholder image dimensions used by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 300x200, used on listing cards and stored on the product.
    Card,
    /// 600x400, used on the detail page.
    Hero,
}

impl ImageSize {
    const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Card => (300, 200),
            Self::Hero => (600, 400),
        }
    }

    /// Deterministic image URL for a product id.
    #[must_use]
    pub fn url_for(self, id: ProductId) -> String {
        let (width, height) = self.dimensions();
        format!("https://picsum.photos/{width}/{height}?random={id}")
    }
}

/// How random product attributes are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeMode {
    /// Fresh randomness on every load; the same id can show a different
    /// price and category on each page view.
    #[default]
    Fresh,
    /// Randomness seeded per product id, so every load agrees.
    Stable { seed: u64 },
}

/// Derive one product from a source record.
pub fn derive_product<R: Rng>(record: &SourceRecord, rng: &mut R) -> Product {
    let id = ProductId::new(record.id);
    let price = Price::whole_dollars(rng.random_range(0..PRICE_SPREAD) + MIN_PRICE);
    let category = Category::from_index(rng.random_range(0..Category::ALL.len()));

    Product {
        id,
        title: record.title.clone(),
        price,
        category,
        image: ImageSize::Card.url_for(id),
        description: record.body.clone(),
    }
}

/// Derive the product collection from the first [`CATALOG_SIZE`] records.
pub fn derive_products<R: Rng>(records: &[SourceRecord], rng: &mut R) -> Vec<Product> {
    records
        .iter()
        .take(CATALOG_SIZE)
        .map(|record| derive_product(record, rng))
        .collect()
}

/// Derive the product collection using the given attribute mode.
#[must_use]
pub fn derive_catalog(records: &[SourceRecord], mode: AttributeMode) -> Vec<Product> {
    match mode {
        AttributeMode::Fresh => derive_products(records, &mut rand::rng()),
        AttributeMode::Stable { seed } => records
            .iter()
            .take(CATALOG_SIZE)
            .map(|record| derive_product(record, &mut stable_rng(seed, record.id)))
            .collect(),
    }
}

fn stable_rng(seed: u64, id: i32) -> StdRng {
    #[allow(clippy::cast_sign_loss)] // Only used as seed material
    let id_bits = u64::from(id as u32);
    StdRng::seed_from_u64(seed ^ id_bits.rotate_left(32))
}
