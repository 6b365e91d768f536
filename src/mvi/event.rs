//! Base trait for events in MVI architecture.

use std::fmt::Debug;

/// Marker trait for event objects.
///
/// Events represent:
/// - User actions forwarded by a view layer
/// - Results of effects started by feedbacks (success or mapped failure)
///
/// Events are folded into state by reducers.
pub trait Event: Debug + Send + 'static {}
