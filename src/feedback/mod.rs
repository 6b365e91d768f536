//! Feedbacks: rules that watch a store's state and run effects.
//!
//! A feedback observes every state the store publishes (starting with the
//! initial one), decides whether its effect should be started, kept or
//! cancelled, and routes everything the effect emits back into the store.
//!
//! Two activation rules exist:
//!
//! - [`Feedback::lensing`] projects the state to a comparable key and
//!   restarts the effect only when the key changes. Repeated states with
//!   the same key leave the running effect alone.
//! - [`Feedback::middleware`] reacts to every state. It does not dedup: the
//!   reaction must match on the state itself and return [`Effect::none`]
//!   when it has nothing to do. Whether a still-running effect survives the
//!   next state is chosen with [`MiddlewarePolicy`].
//!
//! [`Feedback::combine`] merges feedbacks without changing how any of them
//! schedules or cancels its own effect.

mod lensing;
mod middleware;
mod runtime;
mod slot;

pub use middleware::MiddlewarePolicy;
pub(crate) use runtime::FeedbackRuntime;

use crate::effect::Effect;
use crate::mvi::{Event, State};
use crate::store::envelope::Intake;

use lensing::Lensing;
use middleware::Middleware;
use slot::EffectSlot;

/// Activation rule driving a single effect slot.
pub(crate) trait Rule<S, E>: Send {
    /// Called with the initial state and after every reduction, on the
    /// store's serialization loop. Must not block.
    fn observe(&mut self, state: &S, slot: &mut EffectSlot, intake: &Intake<E>);

    /// Called once the slot's effect has completed and every event it
    /// produced was reduced. `state` is the current state.
    fn settled(&mut self, _state: &S, _slot: &mut EffectSlot, _intake: &Intake<E>) {}
}

pub(crate) struct Binding<S, E> {
    pub(crate) label: Option<String>,
    pub(crate) rule: Box<dyn Rule<S, E>>,
}

/// One or more effect-producing rules bound to a store's state.
pub struct Feedback<S, E> {
    bindings: Vec<Binding<S, E>>,
}

impl<S: State, E: Event> Feedback<S, E> {
    fn single(rule: impl Rule<S, E> + 'static) -> Self {
        Self {
            bindings: vec![Binding {
                label: None,
                rule: Box::new(rule),
            }],
        }
    }

    /// Restart the effect whenever `project(state)` changes.
    ///
    /// The first observed state always starts `make(key)`. A later state
    /// with an equal key keeps the running effect; a different key cancels
    /// it and starts `make(new_key)`.
    pub fn lensing<K, P, M>(project: P, make: M) -> Self
    where
        K: PartialEq + Clone + Send + 'static,
        P: Fn(&S) -> K + Send + 'static,
        M: Fn(K) -> Effect<E> + Send + 'static,
    {
        Self::single(Lensing::new(move |state: &S| Some(project(state)), make))
    }

    /// Like [`Feedback::lensing`], but `None` keeps the feedback inert:
    /// any running effect is cancelled and nothing is started.
    pub fn lensing_optional<K, P, M>(project: P, make: M) -> Self
    where
        K: PartialEq + Clone + Send + 'static,
        P: Fn(&S) -> Option<K> + Send + 'static,
        M: Fn(K) -> Effect<E> + Send + 'static,
    {
        Self::single(Lensing::new(project, make))
    }

    /// Start `make()` once, on the initial state, and keep it until the
    /// store is torn down. Used to plug external event streams in.
    pub fn source<M>(make: M) -> Self
    where
        M: Fn() -> Effect<E> + Send + 'static,
    {
        Self::lensing(|_: &S| (), move |()| make())
    }

    /// React to every state with [`MiddlewarePolicy::Restart`].
    pub fn middleware<F>(react: F) -> Self
    where
        F: Fn(&S) -> Effect<E> + Send + 'static,
    {
        Self::middleware_with_policy(MiddlewarePolicy::Restart, react)
    }

    /// React to every state with an explicit policy for running effects.
    pub fn middleware_with_policy<F>(policy: MiddlewarePolicy, react: F) -> Self
    where
        F: Fn(&S) -> Effect<E> + Send + 'static,
    {
        Self::single(Middleware::new(policy, react))
    }

    /// Merge feedbacks. Every child keeps its own slot and activation rule.
    pub fn combine<I>(feedbacks: I) -> Self
    where
        I: IntoIterator<Item = Feedback<S, E>>,
    {
        Self {
            bindings: feedbacks
                .into_iter()
                .flat_map(|feedback| feedback.bindings)
                .collect(),
        }
    }

    /// Name the feedback in logs. Children that already carry a label keep
    /// it.
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        for binding in &mut self.bindings {
            if binding.label.is_none() {
                binding.label = Some(label.clone());
            }
        }
        self
    }

    /// Number of independent effect slots.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when no feedback was configured.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn into_bindings(self) -> Vec<Binding<S, E>> {
        self.bindings
    }
}

impl<S: State, E: Event> Default for Feedback<S, E> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<S: State, E: Event> FromIterator<Feedback<S, E>> for Feedback<S, E> {
    fn from_iter<I: IntoIterator<Item = Feedback<S, E>>>(iter: I) -> Self {
        Self::combine(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Counter(u32);
    impl State for Counter {}

    #[derive(Debug)]
    struct Tick;
    impl Event for Tick {}

    #[test]
    fn combine_flattens_children() {
        let feedback: Feedback<Counter, Tick> = Feedback::combine([
            Feedback::middleware(|_| Effect::none()),
            Feedback::combine([
                Feedback::lensing(|s: &Counter| s.0, |_| Effect::none()),
                Feedback::source(Effect::none),
            ]),
        ]);
        assert_eq!(feedback.len(), 3);
        assert!(!feedback.is_empty());
    }

    #[test]
    fn labelled_keeps_existing_labels() {
        let feedback: Feedback<Counter, Tick> = Feedback::combine([
            Feedback::middleware(|_| Effect::none()).labelled("inner"),
            Feedback::middleware(|_| Effect::none()),
        ])
        .labelled("outer");

        let labels: Vec<_> = feedback
            .into_bindings()
            .into_iter()
            .map(|binding| binding.label)
            .collect();
        assert_eq!(
            labels,
            vec![Some("inner".to_string()), Some("outer".to_string())]
        );
    }

    #[test]
    fn default_is_empty() {
        let feedback: Feedback<Counter, Tick> = Feedback::default();
        assert!(feedback.is_empty());
    }
}
