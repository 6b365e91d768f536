use std::fmt;

use super::envelope::{Envelope, Intake};
use super::error::StoreError;
use super::lifecycle::Lifecycle;

/// Cloneable `send(event)` capability of a store.
///
/// Handed to whatever layer turns user intent into events. Sending never
/// blocks; events are applied in order on the store's loop.
pub struct Sender<E> {
    intake: Intake<E>,
    lifecycle: Lifecycle,
}

impl<E> Sender<E> {
    pub(crate) fn new(intake: Intake<E>, lifecycle: Lifecycle) -> Self {
        Self { intake, lifecycle }
    }

    /// Queue an event. Silently ignored once the store is torn down.
    pub fn send(&self, event: E) {
        if self.try_send(event).is_err() {
            tracing::trace!("event dropped: store is closed");
        }
    }

    /// Queue an event, reporting whether the store still accepts events.
    pub fn try_send(&self, event: E) -> Result<(), StoreError> {
        if self.lifecycle.is_shutting_down() {
            return Err(StoreError::Closed);
        }
        self.intake
            .send(Envelope::external(event))
            .map_err(|_| StoreError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle.is_shutting_down() || self.intake.is_closed()
    }
}

impl<E> Clone for Sender<E> {
    fn clone(&self) -> Self {
        Self {
            intake: self.intake.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<E> fmt::Debug for Sender<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("closed", &self.is_closed())
            .finish()
    }
}
