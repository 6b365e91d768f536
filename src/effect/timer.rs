//! Timer capability injected into effect producers.

use std::time::Duration;

use async_trait::async_trait;

/// Source of delays for timed effects.
///
/// Passed to feedbacks at construction so tests can substitute it.
#[async_trait]
pub trait Timer: Send + Sync {
    /// Complete after `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Timer backed by the Tokio clock.
///
/// Honors `tokio::time::pause`, so paused-clock tests advance it instantly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
