//! Domain events and the analytics collaborator contract.
//!
//! Mechanics only: no SDK behavior lives here. The storefront decides which
//! actions and states get tracked and with which attributes.

pub mod analytics;
pub mod event;
pub mod in_memory_sink;
pub mod sink;

pub use analytics::{AttributeValue, Attributes, TrackKind, Tracked};
pub use event::Event;
pub use in_memory_sink::{InMemoryAnalyticsSink, InMemorySinkError};
pub use sink::{AnalyticsSink, Subscription};
