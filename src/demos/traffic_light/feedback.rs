//! Feedbacks for the traffic light.
//!
//! Each color owns a middleware whose reaction is a total match over the
//! state: a delayed `Next` while the light shows that color, an inert effect
//! otherwise. At most one of the three is active at a time.

use std::sync::Arc;
use std::time::Duration;

use crate::config::TrafficLightConfig;
use crate::effect::{Effect, Timer};
use crate::feedback::Feedback;

use super::event::TrafficLightEvent;
use super::state::TrafficLightState;

/// How long each color is held before `Next` fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimings {
    pub red: Duration,
    pub yellow: Duration,
    pub green: Duration,
}

impl PhaseTimings {
    pub fn uniform(phase: Duration) -> Self {
        Self {
            red: phase,
            yellow: phase,
            green: phase,
        }
    }
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self::uniform(Duration::from_secs(1))
    }
}

impl From<&TrafficLightConfig> for PhaseTimings {
    fn from(config: &TrafficLightConfig) -> Self {
        Self {
            red: Duration::from_millis(config.red_ms),
            yellow: Duration::from_millis(config.yellow_ms),
            green: Duration::from_millis(config.green_ms),
        }
    }
}

pub fn feedback(
    timings: PhaseTimings,
    timer: Arc<dyn Timer>,
) -> Feedback<TrafficLightState, TrafficLightEvent> {
    Feedback::combine([
        when_red(timings.red, Arc::clone(&timer)),
        when_yellow(timings.yellow, Arc::clone(&timer)),
        when_green(timings.green, timer),
    ])
}

fn when_red(delay: Duration, timer: Arc<dyn Timer>) -> Feedback<TrafficLightState, TrafficLightEvent> {
    Feedback::middleware(move |state: &TrafficLightState| match state {
        TrafficLightState::Red => Effect::delayed(TrafficLightEvent::Next, delay, &timer),
        TrafficLightState::Yellow | TrafficLightState::Green => Effect::none(),
    })
    .labelled("traffic_light.when_red")
}

fn when_yellow(
    delay: Duration,
    timer: Arc<dyn Timer>,
) -> Feedback<TrafficLightState, TrafficLightEvent> {
    Feedback::middleware(move |state: &TrafficLightState| match state {
        TrafficLightState::Yellow => Effect::delayed(TrafficLightEvent::Next, delay, &timer),
        TrafficLightState::Red | TrafficLightState::Green => Effect::none(),
    })
    .labelled("traffic_light.when_yellow")
}

fn when_green(
    delay: Duration,
    timer: Arc<dyn Timer>,
) -> Feedback<TrafficLightState, TrafficLightEvent> {
    Feedback::middleware(move |state: &TrafficLightState| match state {
        TrafficLightState::Green => Effect::delayed(TrafficLightEvent::Next, delay, &timer),
        TrafficLightState::Red | TrafficLightState::Yellow => Effect::none(),
    })
    .labelled("traffic_light.when_green")
}
