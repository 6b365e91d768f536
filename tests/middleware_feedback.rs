mod common;

use std::time::Duration;

use common::{settle, ticking, wait_for, Counter, DropGuard, Probe, ProbeEvent, ProbeReducer};
use feedback_store::{Effect, Feedback, MiddlewarePolicy, Store};
use futures::future;

#[derive(Clone, Default)]
struct Tally {
    built: Counter,
    polled: Counter,
    dropped: Counter,
}

/// Middleware that parks an effect while `key == 1`.
fn while_key_is_one(policy: MiddlewarePolicy, tally: &Tally) -> Feedback<Probe, ProbeEvent> {
    let tally = tally.clone();
    Feedback::middleware_with_policy(policy, move |state: &Probe| {
        if state.key != 1 {
            return Effect::none();
        }
        tally.built.bump();
        let polled = tally.polled.clone();
        let guard = DropGuard(tally.dropped.clone());
        Effect::future(async move {
            let _guard = guard;
            polled.bump();
            future::pending::<ProbeEvent>().await
        })
    })
}

#[tokio::test]
async fn restart_policy_restarts_on_every_state() {
    let tally = Tally::default();
    let store = Store::new::<ProbeReducer>(
        Probe::default(),
        while_key_is_one(MiddlewarePolicy::Restart, &tally),
    );
    let mut states = store.subscribe();

    store.send(ProbeEvent::SetKey(1));
    store.send(ProbeEvent::Noise);
    store.send(ProbeEvent::Noise);
    wait_for(&mut states, |s| s.noise == 2).await;
    settle().await;

    assert_eq!(tally.built.get(), 3);
    // The last effect is still running.
    assert_eq!(tally.dropped.get(), 2);
}

#[tokio::test]
async fn keep_running_policy_keeps_a_live_effect() {
    let tally = Tally::default();
    let store = Store::new::<ProbeReducer>(
        Probe::default(),
        while_key_is_one(MiddlewarePolicy::KeepRunning, &tally),
    );
    let mut states = store.subscribe();

    store.send(ProbeEvent::SetKey(1));
    wait_for(&mut states, |s| s.key == 1).await;
    settle().await;
    store.send(ProbeEvent::Noise);
    store.send(ProbeEvent::Noise);
    wait_for(&mut states, |s| s.noise == 2).await;
    settle().await;

    // Later reactions are discarded unstarted; the first effect never stops.
    assert_eq!(tally.built.get(), 3);
    assert_eq!(tally.polled.get(), 1);
    assert_eq!(tally.dropped.get(), 2);

    store.shutdown();
    store.closed().await;
    settle().await;
    assert_eq!(tally.polled.get(), 1);
    assert_eq!(tally.dropped.get(), 3);
}

#[tokio::test]
async fn inert_reaction_cancels_the_running_effect() {
    for policy in [MiddlewarePolicy::Restart, MiddlewarePolicy::KeepRunning] {
        let tally = Tally::default();
        let store = Store::new::<ProbeReducer>(Probe::default(), while_key_is_one(policy, &tally));
        let mut states = store.subscribe();

        store.send(ProbeEvent::SetKey(1));
        store.send(ProbeEvent::SetKey(4));
        store.send(ProbeEvent::Noise);
        wait_for(&mut states, |s| s.noise == 1).await;
        settle().await;

        assert_eq!(tally.built.get(), 1, "{:?}", policy);
        assert_eq!(tally.dropped.get(), 1, "{:?}", policy);
    }
}

#[tokio::test]
async fn reaction_guarded_on_state_runs_once() {
    let feedback = Feedback::middleware(|state: &Probe| {
        if state.key == 1 && state.received.is_empty() {
            Effect::just(ProbeEvent::Received("loaded".to_string()))
        } else {
            Effect::none()
        }
    });
    let store = Store::new::<ProbeReducer>(Probe::default(), feedback);
    let mut states = store.subscribe();

    store.send(ProbeEvent::SetKey(1));
    wait_for(&mut states, |s| !s.received.is_empty()).await;
    store.send(ProbeEvent::Noise);
    wait_for(&mut states, |s| s.noise == 1).await;
    settle().await;

    assert_eq!(store.state().received, vec!["loaded"]);
}

#[tokio::test]
async fn keep_running_waits_for_a_queued_result() {
    let runs = Counter::default();
    let started = runs.clone();
    let feedback = Feedback::middleware_with_policy(
        MiddlewarePolicy::KeepRunning,
        move |state: &Probe| {
            if state.key != 1 || !state.received.is_empty() {
                return Effect::none();
            }
            let started = started.clone();
            Effect::future(async move {
                started.bump();
                ProbeEvent::Received(format!("run{}", started.get()))
            })
        },
    );
    let store = Store::new::<ProbeReducer>(Probe::default(), feedback);
    let mut states = store.subscribe();

    store.send(ProbeEvent::SetKey(1));
    for _ in 0..1000 {
        store.send(ProbeEvent::Noise);
    }
    wait_for(&mut states, |s| s.noise == 1000 && !s.received.is_empty()).await;
    settle().await;

    assert_eq!(runs.get(), 1);
    assert_eq!(store.state().received, vec!["run1"]);
}

#[tokio::test]
async fn keep_running_reacts_again_once_the_effect_completes() {
    let feedback = Feedback::middleware_with_policy(
        MiddlewarePolicy::KeepRunning,
        |state: &Probe| {
            if state.key == 1 && state.noise < 3 {
                Effect::just(ProbeEvent::Noise)
            } else {
                Effect::none()
            }
        },
    );
    let store = Store::new::<ProbeReducer>(Probe::default(), feedback);
    let mut states = store.subscribe();

    store.send(ProbeEvent::SetKey(1));
    wait_for(&mut states, |s| s.noise == 3).await;
    settle().await;

    assert_eq!(store.state().noise, 3);
}

#[tokio::test(start_paused = true)]
async fn panicking_reaction_still_cancels_under_restart() {
    let feedback = Feedback::middleware(|state: &Probe| match state.key {
        1 => ticking("k1"),
        2 => panic!("cannot react to key 2"),
        _ => Effect::none(),
    });
    let store = Store::new::<ProbeReducer>(Probe::default(), feedback);
    let mut states = store.subscribe();

    store.send(ProbeEvent::SetKey(1));
    wait_for(&mut states, |s| s.received.len() >= 2).await;

    store.send(ProbeEvent::SetKey(2));
    wait_for(&mut states, |s| s.key == 2).await;
    let received = store.state().received.len();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(store.state().received.len(), received);
}
