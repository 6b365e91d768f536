//! Middleware activation: re-evaluate on every state.

use crate::effect::Effect;
use crate::store::envelope::Intake;

use super::slot::EffectSlot;
use super::Rule;

/// What a middleware feedback does with its running effect when the next
/// state arrives.
///
/// Unlike lensing, middleware has no projection to dedup on, so an effect
/// that outlives a single transition would be restarted by every unrelated
/// state change. The policy makes that choice explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MiddlewarePolicy {
    /// Every state cancels the running effect and starts the new reaction.
    /// An inert reaction just cancels.
    #[default]
    Restart,
    /// A live effect is kept while reactions stay non-inert; the new
    /// reaction is discarded. An inert reaction cancels the running effect.
    /// If a reaction was discarded, the state current when the effect
    /// completes is reacted to again.
    KeepRunning,
}

pub(crate) struct Middleware<S, E> {
    react: Box<dyn Fn(&S) -> Effect<E> + Send>,
    policy: MiddlewarePolicy,
    /// A reaction was skipped while the effect was live.
    deferred: bool,
}

impl<S, E> Middleware<S, E> {
    pub(crate) fn new(
        policy: MiddlewarePolicy,
        react: impl Fn(&S) -> Effect<E> + Send + 'static,
    ) -> Self {
        Self {
            react: Box::new(react),
            policy,
            deferred: false,
        }
    }
}

impl<S, E> Rule<S, E> for Middleware<S, E>
where
    S: 'static,
    E: Send + 'static,
{
    fn observe(&mut self, state: &S, slot: &mut EffectSlot, intake: &Intake<E>) {
        match self.policy {
            MiddlewarePolicy::Restart => {
                // Cancel first so a panicking reaction cannot leave the
                // previous effect current.
                slot.cancel();
                let effect = (self.react)(state);
                slot.start(effect, intake);
            }
            MiddlewarePolicy::KeepRunning => {
                let effect = (self.react)(state);
                if effect.is_none() {
                    self.deferred = false;
                    slot.cancel();
                } else if slot.is_live() {
                    self.deferred = true;
                    tracing::trace!(feedback = %slot.label(), "effect still running, reaction deferred");
                } else {
                    self.deferred = false;
                    slot.start(effect, intake);
                }
            }
        }
    }

    fn settled(&mut self, state: &S, slot: &mut EffectSlot, intake: &Intake<E>) {
        if self.deferred {
            self.observe(state, slot, intake);
        }
    }
}
