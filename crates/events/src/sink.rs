//! Analytics sink abstraction (mechanics only).
//!
//! The sink is the boundary to the third-party analytics SDK. Its contract is
//! **fire and forget**: callers hand over a [`Tracked`] message and never
//! consume a result beyond logging a failure.
//!
//! - **Transport-agnostic**: in-memory channels in tests, an SDK bridge in an app.
//! - **No persistence**: a message that fails to publish is dropped after logging.
//! - **Broadcast**: every subscription receives a copy of every published message.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use crate::analytics::Tracked;

/// A subscription to tracked messages.
///
/// Used by tests and debug tooling to observe what the storefront reported.
///
/// ```ignore
/// let sink = InMemoryAnalyticsSink::new();
/// let subscription = sink.subscribe();
///
/// storefront.pay_now();
///
/// let tracked = subscription.drain();
/// assert_eq!(tracked.last().unwrap().name, "payNow");
/// ```
///
/// Designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M = Tracked> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Collect everything already published, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Fire-and-forget analytics collaborator.
///
/// `publish()` may fail (SDK not configured, bridge gone). Failures are surfaced
/// so the caller can log them; callers must not retry or block on them.
///
/// Requires `Send + Sync` so one sink can be shared by every screen.
pub trait AnalyticsSink: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn publish(&self, message: Tracked) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<Tracked>;
}

impl<S> AnalyticsSink for Arc<S>
where
    S: AnalyticsSink + ?Sized,
{
    type Error = S::Error;

    fn publish(&self, message: Tracked) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<Tracked> {
        (**self).subscribe()
    }
}
