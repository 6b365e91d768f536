mod common;

use common::{settle, wait_for, Counter, DropGuard, Probe, ProbeEvent, ProbeReducer};
use feedback_store::{Effect, Feedback, Store};
use futures::future;

fn parked_on<K>(
    project: fn(&Probe) -> K,
    started: &Counter,
    cancelled: &Counter,
) -> Feedback<Probe, ProbeEvent>
where
    K: PartialEq + Clone + Send + 'static,
{
    let (started, cancelled) = (started.clone(), cancelled.clone());
    Feedback::lensing(project, move |_key: K| {
        started.bump();
        let guard = DropGuard(cancelled.clone());
        Effect::future(async move {
            let _guard = guard;
            future::pending::<ProbeEvent>().await
        })
    })
}

#[tokio::test]
async fn children_schedule_and_cancel_independently() {
    let (key_started, key_cancelled) = (Counter::default(), Counter::default());
    let (noise_started, noise_cancelled) = (Counter::default(), Counter::default());
    let feedback = Feedback::combine([
        parked_on(|s| s.key, &key_started, &key_cancelled),
        parked_on(|s| s.noise, &noise_started, &noise_cancelled),
    ]);
    let store = Store::new::<ProbeReducer>(Probe::default(), feedback);
    let mut states = store.subscribe();

    store.send(ProbeEvent::SetKey(1));
    store.send(ProbeEvent::SetKey(2));
    wait_for(&mut states, |s| s.key == 2).await;
    settle().await;
    assert_eq!((key_started.get(), key_cancelled.get()), (3, 2));
    assert_eq!((noise_started.get(), noise_cancelled.get()), (1, 0));

    store.send(ProbeEvent::Noise);
    wait_for(&mut states, |s| s.noise == 1).await;
    settle().await;
    assert_eq!((key_started.get(), key_cancelled.get()), (3, 2));
    assert_eq!((noise_started.get(), noise_cancelled.get()), (2, 1));
}

#[tokio::test]
async fn events_from_every_child_reach_the_reducer() {
    let feedback = Feedback::combine([
        Feedback::lensing(
            |s: &Probe| s.key,
            |key| Effect::just(ProbeEvent::Received(format!("lens{}", key))),
        ),
        Feedback::middleware(|s: &Probe| {
            if s.key == 1 && s.noise == 0 {
                Effect::just(ProbeEvent::Noise)
            } else {
                Effect::none()
            }
        }),
        Feedback::source(|| Effect::just(ProbeEvent::Received("source".to_string()))),
    ]);
    let store = Store::new::<ProbeReducer>(Probe::default(), feedback);
    let mut states = store.subscribe();

    wait_for(&mut states, |s| s.received.len() == 2).await;
    store.send(ProbeEvent::SetKey(1));
    let state = wait_for(&mut states, |s| s.noise == 1 && s.received.len() == 3).await;

    let mut received = state.received.clone();
    received.sort();
    assert_eq!(received, vec!["lens0", "lens1", "source"]);
}

#[tokio::test]
async fn empty_combination_is_a_plain_reducer() {
    let store = Store::new::<ProbeReducer>(Probe::default(), Feedback::combine(Vec::new()));
    let mut states = store.subscribe();

    store.send(ProbeEvent::SetKey(8));
    let state = wait_for(&mut states, |s| s.key == 8).await;
    assert!(state.received.is_empty());
}
