//! Shopping cart domain module.
//!
//! Business rules for the per-session cart, implemented as deterministic domain
//! logic (no IO, no analytics, no storage).

pub mod cart;
pub mod line;

pub use cart::{
    AddItem, Cart, CartCleared, CartCommand, CartEvent, ClearCart, DecrementQuantity,
    IncrementQuantity, ItemAdded, ItemRemoved, QuantityChanged, RemoveItem,
};
pub use line::{CartCandidate, CartLineItem, LineKey};
