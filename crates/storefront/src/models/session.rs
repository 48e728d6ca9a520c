//! Session-related types.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the serialized cart (a JSON array of line items).
    pub const CART: &str = mockshop_core::CART_STORAGE_KEY;
}
