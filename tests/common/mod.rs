//! Shared test utilities: a probe domain and waiting helpers.

#![allow(dead_code, unused_imports)]

use feedback_store::{Effect, Event, Reducer, State};
use futures::stream;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Minimal state for exercising the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Probe {
    pub key: u32,
    pub noise: u32,
    pub received: Vec<String>,
}

impl State for Probe {}

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeEvent {
    SetKey(u32),
    Noise,
    Received(String),
    Explode,
}

impl Event for ProbeEvent {}

pub struct ProbeReducer;

impl Reducer for ProbeReducer {
    type State = Probe;
    type Event = ProbeEvent;

    fn reduce(mut state: Self::State, event: Self::Event) -> Self::State {
        match event {
            ProbeEvent::SetKey(key) => state.key = key,
            ProbeEvent::Noise => state.noise += 1,
            ProbeEvent::Received(value) => state.received.push(value),
            ProbeEvent::Explode => panic!("reducer exploded"),
        }
        state
    }
}

/// Wrap a reducer so every produced state is appended to `log`.
pub fn recording<R>(
    log: Arc<Mutex<Vec<R::State>>>,
) -> impl Fn(R::State, R::Event) -> R::State + Send + 'static
where
    R: Reducer + 'static,
{
    move |state, event| {
        let next = R::reduce(state, event);
        log.lock().push(next.clone());
        next
    }
}

/// Wait (up to 5s of runtime time) until the published state satisfies `pred`.
pub async fn wait_for<S: Clone>(
    states: &mut watch::Receiver<S>,
    pred: impl FnMut(&S) -> bool,
) -> S {
    let state = tokio::time::timeout(Duration::from_secs(5), states.wait_for(pred))
        .await
        .expect("timed out waiting for state")
        .expect("store stopped while waiting");
    state.clone()
}

/// Let spawned tasks run (paused clock advances automatically).
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

/// Counter shared between a test and the effects it spawns.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Bumps the counter when dropped, i.e. when an effect is cancelled.
pub struct DropGuard(pub Counter);

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.0.bump();
    }
}

/// Effect emitting `Received(label)` every 10ms until cancelled.
pub fn ticking(label: &str) -> Effect<ProbeEvent> {
    let label = label.to_string();
    Effect::stream(stream::unfold((), move |()| {
        let label = label.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Some((ProbeEvent::Received(label), ()))
        }
    }))
}
