//! Domain models for storefront.
//!
//! Catalog and cart types live in `mockshop_core`; this module only holds
//! what the storefront keeps in the session.

pub mod session;

pub use session::keys as session_keys;
