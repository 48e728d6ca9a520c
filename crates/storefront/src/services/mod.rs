//! Business logic services.
//!
//! Services sit between route handlers and storage, so handlers stay thin
//! adapters over the pure transforms in `mockshop_core`.

pub mod cart;

pub use cart::{CartStore, CartStoreError};
