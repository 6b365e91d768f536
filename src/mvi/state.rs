//! Base trait for store state in MVI architecture.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable from the outside (Clone to publish snapshots)
/// - Self-contained (all data a view needs)
///
/// Equality is not required. Feedbacks that dedup on a projection only
/// need equality on the projected value.
pub trait State: Clone + Send + Sync + 'static {}
