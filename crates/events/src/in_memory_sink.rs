//! In-memory analytics sink for tests/dev.

use std::sync::{Mutex, mpsc};

use thiserror::Error;

use crate::analytics::Tracked;
use crate::sink::{AnalyticsSink, Subscription};

#[derive(Debug, Error)]
pub enum InMemorySinkError {
    /// Publish failed due to internal lock poisoning.
    #[error("analytics sink lock poisoned")]
    Poisoned,
}

/// In-memory pub/sub sink.
///
/// - No IO / no async
/// - Best-effort fan-out
/// - Messages published before a subscription exists are not replayed
#[derive(Debug, Default)]
pub struct InMemoryAnalyticsSink {
    subscribers: Mutex<Vec<mpsc::Sender<Tracked>>>,
}

impl InMemoryAnalyticsSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalyticsSink for InMemoryAnalyticsSink {
    type Error = InMemorySinkError;

    fn publish(&self, message: Tracked) -> Result<(), Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemorySinkError::Poisoned)?;

        tracing::debug!(kind = ?message.kind, name = %message.name, "analytics message published");

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self) -> Subscription<Tracked> {
        let (tx, rx) = mpsc::channel();

        // A poisoned lock still yields a subscription; it just stays silent.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}
