//! Events as they travel through a store's intake queue.

use tokio::sync::mpsc;

/// Sending half of a store's intake queue.
pub(crate) type Intake<E> = mpsc::UnboundedSender<Envelope<E>>;

/// Where an event entered the store from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// `Sender::send`, i.e. the view layer or any other outside caller.
    External,
    /// An effect started by the feedback slot `slot` during `generation`.
    Effect { slot: usize, generation: u64 },
}

#[derive(Debug)]
pub(crate) enum Payload<E> {
    Event(E),
    /// The effect's stream ended. Queued after its last event.
    Completed,
}

#[derive(Debug)]
pub(crate) struct Envelope<E> {
    pub(crate) origin: Origin,
    pub(crate) payload: Payload<E>,
}

impl<E> Envelope<E> {
    pub(crate) fn external(event: E) -> Self {
        Self {
            origin: Origin::External,
            payload: Payload::Event(event),
        }
    }

    pub(crate) fn from_effect(slot: usize, generation: u64, event: E) -> Self {
        Self {
            origin: Origin::Effect { slot, generation },
            payload: Payload::Event(event),
        }
    }

    pub(crate) fn completed(slot: usize, generation: u64) -> Self {
        Self {
            origin: Origin::Effect { slot, generation },
            payload: Payload::Completed,
        }
    }
}
