//! Per-feedback effect slot.
//!
//! A slot owns at most one running effect. Every start or cancel bumps the
//! slot generation; the running task tags its events with the generation it
//! was started under, and the store drops events whose tag is stale. Task
//! abortion is not instantaneous, so the tag is what guarantees a superseded
//! effect never lands an event after its replacement was started.
//!
//! A finished effect queues a completion marker behind its last event. The
//! slot stays live until the store has processed that marker, so every event
//! the effect produced is reduced before the slot counts as free.

use std::thread;

use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::effect::Effect;
use crate::store::envelope::{Envelope, Intake};

pub(crate) struct EffectSlot {
    index: usize,
    label: String,
    generation: u64,
    running: Option<JoinHandle<()>>,
}

impl EffectSlot {
    pub(crate) fn new(index: usize, label: String) -> Self {
        Self {
            index,
            label,
            generation: 0,
            running: None,
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// True if events tagged with `generation` may still be delivered.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// An effect was started and the store has not yet seen it complete.
    pub(crate) fn is_live(&self) -> bool {
        self.running.is_some()
    }

    /// The current effect's completion marker reached the store.
    pub(crate) fn finish(&mut self) {
        if self.running.take().is_some() {
            tracing::trace!(feedback = %self.label, generation = self.generation, "effect completed");
        }
    }

    /// Stop the running effect, if any. Safe to call repeatedly.
    pub(crate) fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.running.take() {
            if !handle.is_finished() {
                tracing::trace!(feedback = %self.label, "cancelling effect");
            }
            handle.abort();
        }
    }

    /// Replace the running effect. An inert effect only cancels.
    pub(crate) fn start<E: Send + 'static>(&mut self, effect: Effect<E>, intake: &Intake<E>) {
        self.cancel();
        let Some(mut events) = effect.into_stream() else {
            return;
        };

        let slot = self.index;
        let generation = self.generation;
        let intake = intake.clone();
        tracing::trace!(feedback = %self.label, generation, "starting effect");
        self.running = Some(tokio::spawn(async move {
            let report = PanicReport {
                intake: intake.clone(),
                slot,
                generation,
            };
            while let Some(event) = events.next().await {
                if intake
                    .send(Envelope::from_effect(slot, generation, event))
                    .is_err()
                {
                    // Store is gone.
                    return;
                }
            }
            drop(report);
            let _ = intake.send(Envelope::completed(slot, generation));
        }));
    }
}

impl Drop for EffectSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.running.take() {
            handle.abort();
        }
    }
}

/// Reports completion for an effect whose stream panicked, so the slot does
/// not stay live forever. Aborted tasks report nothing.
struct PanicReport<E> {
    intake: Intake<E>,
    slot: usize,
    generation: u64,
}

impl<E> Drop for PanicReport<E> {
    fn drop(&mut self) {
        if thread::panicking() {
            let _ = self
                .intake
                .send(Envelope::completed(self.slot, self.generation));
        }
    }
}
