//! Feedback bookkeeping owned by a store's serialization loop.

use std::panic::{self, AssertUnwindSafe};

use crate::mvi::{Event, State};
use crate::store::envelope::{Intake, Origin};

use super::slot::EffectSlot;
use super::{Feedback, Rule};

pub(crate) struct FeedbackRuntime<S, E> {
    rules: Vec<Box<dyn Rule<S, E>>>,
    slots: Vec<EffectSlot>,
}

impl<S: State, E: Event> FeedbackRuntime<S, E> {
    pub(crate) fn new(feedback: Feedback<S, E>) -> Self {
        let bindings = feedback.into_bindings();
        let mut rules = Vec::with_capacity(bindings.len());
        let mut slots = Vec::with_capacity(bindings.len());
        for (index, binding) in bindings.into_iter().enumerate() {
            let label = binding
                .label
                .unwrap_or_else(|| format!("feedback[{}]", index));
            slots.push(EffectSlot::new(index, label));
            rules.push(binding.rule);
        }
        Self { rules, slots }
    }

    /// Run every activation rule against `state`, in configuration order.
    ///
    /// A rule that panics is logged and skipped for this state; the others
    /// still run.
    pub(crate) fn observe(&mut self, state: &S, intake: &Intake<E>) {
        for (rule, slot) in self.rules.iter_mut().zip(self.slots.iter_mut()) {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| rule.observe(state, slot, intake)));
            if outcome.is_err() {
                tracing::error!(feedback = %slot.label(), "feedback panicked while observing state");
            }
        }
    }

    /// Whether an event from `origin` may still be applied.
    ///
    /// Events from effects that were cancelled or superseded since they were
    /// emitted are rejected.
    pub(crate) fn accepts(&self, origin: Origin) -> bool {
        match origin {
            Origin::External => true,
            Origin::Effect { slot, generation } => self
                .slots
                .get(slot)
                .is_some_and(|slot| slot.is_current(generation)),
        }
    }

    /// The current effect of `slot` completed. Lets its rule react to the
    /// current state if it was waiting for the slot to free up.
    pub(crate) fn complete(&mut self, slot: usize, state: &S, intake: &Intake<E>) {
        let (Some(rule), Some(slot)) = (self.rules.get_mut(slot), self.slots.get_mut(slot)) else {
            return;
        };
        slot.finish();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.settled(state, slot, intake)));
        if outcome.is_err() {
            tracing::error!(feedback = %slot.label(), "feedback panicked after effect completed");
        }
    }

    pub(crate) fn label(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).map(EffectSlot::label)
    }

    pub(crate) fn cancel_all(&mut self) {
        for slot in &mut self.slots {
            slot.cancel();
        }
    }
}
