//! Lensing activation: restart when a projection of the state changes.

use crate::effect::Effect;
use crate::store::envelope::Intake;

use super::slot::EffectSlot;
use super::Rule;

pub(crate) struct Lensing<S, E, K> {
    project: Box<dyn Fn(&S) -> Option<K> + Send>,
    make: Box<dyn Fn(K) -> Effect<E> + Send>,
    /// `None` until the first state was observed.
    last: Option<Option<K>>,
}

impl<S, E, K> Lensing<S, E, K> {
    pub(crate) fn new(
        project: impl Fn(&S) -> Option<K> + Send + 'static,
        make: impl Fn(K) -> Effect<E> + Send + 'static,
    ) -> Self {
        Self {
            project: Box::new(project),
            make: Box::new(make),
            last: None,
        }
    }
}

impl<S, E, K> Rule<S, E> for Lensing<S, E, K>
where
    S: 'static,
    E: Send + 'static,
    K: PartialEq + Clone + Send + 'static,
{
    fn observe(&mut self, state: &S, slot: &mut EffectSlot, intake: &Intake<E>) {
        let key = (self.project)(state);
        if self.last.as_ref() == Some(&key) {
            return;
        }
        // Cancel before `make` runs: if it panics the old effect is gone and
        // the key stays unrecorded, so the next state tries again.
        slot.cancel();
        if let Some(key) = key.clone() {
            let effect = (self.make)(key);
            slot.start(effect, intake);
        }
        self.last = Some(key);
    }
}
