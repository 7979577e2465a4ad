//! Storefront session: wires the cart, the catalog and the two opaque
//! collaborators (key-value storage and analytics) together.
//!
//! The collaborators are injected; nothing here is a process-wide singleton.

pub mod config;
pub mod decision_scope;
pub mod error;
pub mod profile;
pub mod session;
pub mod shared_cart;
pub mod store;

pub use config::StorefrontConfig;
pub use decision_scope::DecisionScope;
pub use error::{StoreError, StorefrontError, StorefrontResult};
pub use profile::{DECISION_SCOPE_KEY, PROFILE_KEY, Profile, ProfileStorage};
pub use session::{CheckoutSummary, Receipt, Screen, Storefront};
pub use shared_cart::SharedCart;
pub use store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
