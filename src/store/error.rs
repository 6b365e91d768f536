use thiserror::Error;

/// Errors surfaced by a store's public surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store was torn down; the event was discarded.
    #[error("store is closed")]
    Closed,
}
