//! The store: single owner of state and serialization point for events.
//!
//! # Architecture
//!
//! ```text
//! Sender::send ──┐
//!                ├──→ intake queue ──→ reducer ──→ publish ──→ feedbacks
//! effect tasks ──┘                                               │
//!      ↑                                                         │
//!      └──────────────────── start / cancel ─────────────────────┘
//! ```
//!
//! A store runs one Tokio task that drains the intake queue. For every
//! accepted event it applies the reducer, publishes the new state to
//! observers, then lets every feedback run its activation check, all before
//! the next event is dequeued. Effects run on their own tasks and only talk
//! to the store through the queue.

pub(crate) mod envelope;
mod error;
mod lifecycle;
mod sender;

pub use error::StoreError;
pub use lifecycle::StorePhase;
pub use sender::Sender;

use std::panic::{self, AssertUnwindSafe};

use tokio::sync::{mpsc, watch};
use tracing::Instrument;
use uuid::Uuid;

use crate::feedback::{Feedback, FeedbackRuntime};
use crate::mvi::{Event, Reducer, State};

use envelope::{Envelope, Intake, Origin, Payload};
use lifecycle::Lifecycle;

type ReduceFn<S, E> = Box<dyn Fn(S, E) -> S + Send>;

/// State container driven by a reducer and a set of feedbacks.
///
/// Dropping the store tears it down.
pub struct Store<S, E> {
    id: Uuid,
    sender: Sender<E>,
    state: watch::Receiver<S>,
    lifecycle: Lifecycle,
}

impl<S: State, E: Event> Store<S, E> {
    /// Create a store reducing with `R`.
    ///
    /// The initial state is used as-is (no reducer pass) and is the first
    /// state every feedback observes.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn new<R>(initial: S, feedback: Feedback<S, E>) -> Self
    where
        R: Reducer<State = S, Event = E> + 'static,
    {
        Self::with_reducer(initial, R::reduce, feedback)
    }

    /// Create a store from a reducer function.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn with_reducer<F>(initial: S, reducer: F, feedback: Feedback<S, E>) -> Self
    where
        F: Fn(S, E) -> S + Send + 'static,
    {
        let id = Uuid::new_v4();
        let (intake, queue) = mpsc::unbounded_channel();
        let (publisher, state) = watch::channel(initial.clone());
        let lifecycle = Lifecycle::new();

        let serializer = Serializer {
            state: initial,
            reducer: Box::new(reducer),
            runtime: FeedbackRuntime::new(feedback),
            publisher,
            intake: intake.clone(),
            queue,
            lifecycle: lifecycle.clone(),
        };
        tokio::spawn(serializer.run().instrument(tracing::info_span!("store", %id)));

        Self {
            id,
            sender: Sender::new(intake, lifecycle.clone()),
            state,
            lifecycle,
        }
    }

    /// Queue an event. Ignored after teardown.
    pub fn send(&self, event: E) {
        self.sender.send(event);
    }

    /// Cloneable send capability for a view layer.
    pub fn sender(&self) -> Sender<E> {
        self.sender.clone()
    }

    /// Snapshot of the state produced by the latest completed reduction.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Observe state changes.
    ///
    /// The receiver reports an error from `changed()` once the store has
    /// stopped.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.clone()
    }

    /// Wait for the next published state.
    ///
    /// Fails with [`StoreError::Closed`] once the store has stopped.
    pub async fn changed(&mut self) -> Result<S, StoreError> {
        self.state
            .changed()
            .await
            .map_err(|_| StoreError::Closed)?;
        Ok(self.state.borrow_and_update().clone())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> StorePhase {
        self.lifecycle.phase()
    }

    /// Tear the store down: stop reducing, cancel every effect and release
    /// observers. Idempotent; returns without waiting for the loop.
    pub fn shutdown(&self) {
        if self.lifecycle.signal() {
            tracing::info!(store = %self.id, "store teardown requested");
        }
    }

    /// Wait until the serialization loop has exited after [`Store::shutdown`].
    pub async fn closed(&self) {
        self.lifecycle.wait_stopped().await;
    }
}

impl<S, E> Drop for Store<S, E> {
    fn drop(&mut self) {
        self.lifecycle.signal();
    }
}

/// The store's serialization loop and everything it exclusively owns.
struct Serializer<S, E> {
    state: S,
    reducer: ReduceFn<S, E>,
    runtime: FeedbackRuntime<S, E>,
    publisher: watch::Sender<S>,
    intake: Intake<E>,
    queue: mpsc::UnboundedReceiver<Envelope<E>>,
    lifecycle: Lifecycle,
}

impl<S: State, E: Event> Serializer<S, E> {
    async fn run(mut self) {
        tracing::debug!("store started");
        self.runtime.observe(&self.state, &self.intake);

        loop {
            let envelope = tokio::select! {
                biased;
                _ = self.lifecycle.wait_signaled() => break,
                envelope = self.queue.recv() => match envelope {
                    Some(envelope) => envelope,
                    None => break,
                },
            };
            if self.lifecycle.is_shutting_down() {
                break;
            }
            self.process(envelope);
        }

        self.runtime.cancel_all();
        self.queue.close();
        self.lifecycle.mark_stopped();
        tracing::info!("store stopped");
    }

    fn process(&mut self, envelope: Envelope<E>) {
        let Envelope { origin, payload } = envelope;
        if !self.runtime.accepts(origin) {
            if let Origin::Effect { slot, generation } = origin {
                tracing::trace!(
                    feedback = self.runtime.label(slot).unwrap_or("unknown"),
                    generation,
                    ?payload,
                    "dropping message from superseded effect"
                );
            }
            return;
        }

        let event = match payload {
            Payload::Event(event) => event,
            Payload::Completed => {
                if let Origin::Effect { slot, .. } = origin {
                    self.runtime.complete(slot, &self.state, &self.intake);
                }
                return;
            }
        };

        tracing::debug!(?event, "reducing");
        let current = self.state.clone();
        let reducer = &self.reducer;
        match panic::catch_unwind(AssertUnwindSafe(|| reducer(current, event))) {
            Ok(next) => self.state = next,
            Err(_) => {
                tracing::error!("reducer panicked; state left unchanged");
                return;
            }
        }

        self.publisher.send_replace(self.state.clone());
        self.runtime.observe(&self.state, &self.intake);
    }
}
