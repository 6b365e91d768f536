//! Effects: lazily started, cancellable producers of events.
//!
//! An [`Effect`] describes asynchronous work without running it. A feedback
//! hands the effect to its slot, which spawns it on the runtime and forwards
//! every produced event to the store. Dropping or cancelling the spawned task
//! stops the effect.
//!
//! Effects never fail. Constructors that wrap fallible work take a mapping
//! from the error to an event, so failures reach the store as data.

mod timer;

pub use timer::{Timer, TokioTimer};

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, Stream, StreamExt};

/// A cancellable producer of zero or more events.
pub struct Effect<E> {
    kind: EffectKind<E>,
}

enum EffectKind<E> {
    /// Inert: produces nothing and completes immediately.
    None,
    Stream(BoxStream<'static, E>),
}

impl<E: Send + 'static> Effect<E> {
    /// An effect that emits nothing.
    pub fn none() -> Self {
        Self {
            kind: EffectKind::None,
        }
    }

    /// Emit a single event as soon as the effect is started.
    pub fn just(event: E) -> Self {
        Self::stream(stream::once(async move { event }))
    }

    /// Emit the output of a future.
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = E> + Send + 'static,
    {
        Self::stream(stream::once(future))
    }

    /// Run fallible work, mapping both outcomes to events.
    pub fn task<F, T, X, OnOk, OnErr>(future: F, on_ok: OnOk, on_err: OnErr) -> Self
    where
        F: Future<Output = Result<T, X>> + Send + 'static,
        OnOk: FnOnce(T) -> E + Send + 'static,
        OnErr: FnOnce(X) -> E + Send + 'static,
        T: Send + 'static,
        X: Send + 'static,
    {
        Self::future(async move {
            match future.await {
                Ok(value) => on_ok(value),
                Err(err) => on_err(err),
            }
        })
    }

    /// Forward every item of a stream.
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = E> + Send + 'static,
    {
        Self {
            kind: EffectKind::Stream(stream.boxed()),
        }
    }

    /// Emit `event` once `delay` has elapsed on the given timer.
    pub fn delayed(event: E, delay: Duration, timer: &Arc<dyn Timer>) -> Self {
        let timer = Arc::clone(timer);
        Self::future(async move {
            timer.sleep(delay).await;
            event
        })
    }

    /// Run all effects concurrently.
    ///
    /// Each child keeps its own emission order; nothing is guaranteed
    /// between children.
    pub fn merge<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = Effect<E>>,
    {
        let streams: Vec<_> = effects
            .into_iter()
            .filter_map(Effect::into_stream)
            .collect();
        if streams.is_empty() {
            return Self::none();
        }
        Self::stream(stream::select_all(streams))
    }

    /// Convert every produced event.
    pub fn map<E2, F>(self, f: F) -> Effect<E2>
    where
        E2: Send + 'static,
        F: FnMut(E) -> E2 + Send + 'static,
    {
        match self.kind {
            EffectKind::None => Effect::none(),
            EffectKind::Stream(stream) => Effect::stream(stream.map(f)),
        }
    }

    /// True for effects that produce nothing.
    pub fn is_none(&self) -> bool {
        matches!(self.kind, EffectKind::None)
    }

    pub(crate) fn into_stream(self) -> Option<BoxStream<'static, E>> {
        match self.kind {
            EffectKind::None => None,
            EffectKind::Stream(stream) => Some(stream),
        }
    }
}

impl<E: Send + 'static> Default for Effect<E> {
    fn default() -> Self {
        Self::none()
    }
}

impl<E> fmt::Debug for Effect<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EffectKind::None => f.write_str("Effect::None"),
            EffectKind::Stream(_) => f.write_str("Effect::Stream"),
        }
    }
}
