//! Cache invalidation coordination
//!
//! Mutation paths publish [`InvalidationSignal`]s through a cloneable
//! [`InvalidationBus`]; a single [`InvalidationCoordinator`] consumes them
//! and issues revalidation calls into the shared [`SwrCache`]. The channel
//! replaces the pair of process-wide mutable flags the pattern is usually
//! built on: every signal is consumed exactly once and near-simultaneous
//! signals queue up instead of overwriting each other.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::swr::SwrCache;
use crate::domain::{FetchKey, InvalidationSignal};

/// Sending half held by mutation call sites
#[derive(Debug, Clone)]
pub struct InvalidationBus {
    tx: mpsc::UnboundedSender<InvalidationSignal>,
}

impl InvalidationBus {
    /// Create a bus and the receiver for its coordinator
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<InvalidationSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Publish a signal after a successful mutation
    pub fn publish(&self, signal: InvalidationSignal) {
        debug!(kind = %signal.kind, id = ?signal.id, "invalidation signal published");

        if self.tx.send(signal).is_err() {
            warn!("invalidation coordinator is gone; signal dropped");
        }
    }
}

/// The single consumer of invalidation signals.
///
/// Idle until a signal arrives; for each signal it issues a targeted
/// revalidation for the item key (when an id is present) and a broad
/// revalidation for every cached key containing the resource prefix, then
/// returns to idle. With no pending signal it issues no calls at all.
#[derive(Debug)]
pub struct InvalidationCoordinator {
    cache: SwrCache,
    rx: mpsc::UnboundedReceiver<InvalidationSignal>,
}

impl InvalidationCoordinator {
    pub fn new(cache: SwrCache, rx: mpsc::UnboundedReceiver<InvalidationSignal>) -> Self {
        Self { cache, rx }
    }

    /// Consume signals until every sender is dropped
    pub async fn run(mut self) {
        while let Some(signal) = self.rx.recv().await {
            self.handle(signal).await;
        }

        debug!("invalidation bus closed; coordinator stopping");
    }

    /// Drain all currently queued signals, returning how many were handled.
    ///
    /// Calling this again without new signals handles zero and issues zero
    /// revalidation calls.
    pub async fn process_pending(&mut self) -> usize {
        let mut handled = 0;

        while let Ok(signal) = self.rx.try_recv() {
            self.handle(signal).await;
            handled += 1;
        }

        handled
    }

    async fn handle(&self, signal: InvalidationSignal) {
        if let Some(id) = &signal.id {
            let key = FetchKey::item(signal.kind, id);
            self.cache.invalidate(&key).await;
            debug!(key = %key, "targeted revalidation issued");
        }

        self.cache.invalidate_containing(signal.kind.prefix()).await;
    }
}
