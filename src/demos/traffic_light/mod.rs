//! Traffic light: a timer-driven cycle red → yellow → green → red.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Light color enum
//! - `event.rs` - `Next`
//! - `reducer.rs` - Color cycle (pure, no side effects)
//! - `feedback.rs` - One middleware per color, each firing a delayed `Next`
//!   only while the light shows its color

mod event;
mod feedback;
mod reducer;
mod state;

pub use event::TrafficLightEvent;
pub use feedback::{feedback, PhaseTimings};
pub use reducer::TrafficLightReducer;
pub use state::TrafficLightState;

use std::sync::Arc;

use crate::effect::Timer;
use crate::store::Store;

/// Store for a traffic light starting at red.
pub fn make_store(
    timings: PhaseTimings,
    timer: Arc<dyn Timer>,
) -> Store<TrafficLightState, TrafficLightEvent> {
    Store::new::<TrafficLightReducer>(TrafficLightState::default(), feedback(timings, timer))
}
