//! Product catalog module.
//!
//! Static categories and products offered by the storefront, plus slug lookup.
//! Pure data and lookups (no IO).

pub mod catalog;
pub mod slug;

pub use catalog::{Catalog, Category, Product};
pub use slug::slugify;
