//! Mockshop Core - Catalog, listing and cart logic.
//!
//! This crate provides the domain types and pure transforms used by the
//! storefront:
//! - deriving mock products from placeholder source records
//! - filtering and paginating a product listing
//! - merging products into a persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session access. Randomness is injected by the caller so every
//! transform can be tested deterministically.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and categories
//! - [`catalog`] - Source records and mock product derivation
//! - [`listing`] - Search filtering, pagination and view mode
//! - [`cart`] - Cart line items and the add-to-cart merge

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod listing;
pub mod types;

pub use cart::{CART_STORAGE_KEY, Cart, CartError, CartItem};
pub use catalog::{AttributeMode, CATALOG_SIZE, ImageSize, Product, SourceRecord};
pub use listing::{PAGE_SIZE, Page, ViewMode};
pub use types::*;
