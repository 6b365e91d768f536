use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StorePhase {
    Running = 0,
    /// Teardown requested; no further events are reduced.
    Stopping = 1,
    /// Serialization loop exited and every effect was cancelled.
    Stopped = 2,
}

/// Shared teardown flag between a store, its senders and its loop.
#[derive(Clone)]
pub(crate) struct Lifecycle {
    phase: Arc<AtomicU8>,
    notify: Arc<Notify>,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            phase: Arc::new(AtomicU8::new(StorePhase::Running as u8)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub(crate) fn phase(&self) -> StorePhase {
        match self.phase.load(Ordering::SeqCst) {
            0 => StorePhase::Running,
            1 => StorePhase::Stopping,
            _ => StorePhase::Stopped,
        }
    }

    pub(crate) fn is_shutting_down(&self) -> bool {
        self.phase() != StorePhase::Running
    }

    /// Request teardown. Returns false if it was already requested.
    pub(crate) fn signal(&self) -> bool {
        let first = self
            .phase
            .compare_exchange(
                StorePhase::Running as u8,
                StorePhase::Stopping as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if first {
            self.notify.notify_waiters();
        }
        first
    }

    pub(crate) fn mark_stopped(&self) {
        self.phase.store(StorePhase::Stopped as u8, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Wait until teardown was requested.
    pub(crate) async fn wait_signaled(&self) {
        self.wait_until(|phase| phase != StorePhase::Running).await;
    }

    /// Wait until the loop has exited.
    pub(crate) async fn wait_stopped(&self) {
        self.wait_until(|phase| phase == StorePhase::Stopped).await;
    }

    async fn wait_until(&self, reached: impl Fn(StorePhase) -> bool) {
        loop {
            // Register with Notify before reading the phase, otherwise a
            // notify_waiters() between the check and the await is lost.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if reached(self.phase()) {
                return;
            }
            notified.await;
        }
    }
}
