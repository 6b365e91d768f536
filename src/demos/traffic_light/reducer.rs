//! Reducer for the traffic light.

use crate::mvi::Reducer;

use super::event::TrafficLightEvent;
use super::state::TrafficLightState;

pub struct TrafficLightReducer;

impl Reducer for TrafficLightReducer {
    type State = TrafficLightState;
    type Event = TrafficLightEvent;

    fn reduce(state: Self::State, event: Self::Event) -> Self::State {
        match event {
            TrafficLightEvent::Next => match state {
                TrafficLightState::Red => TrafficLightState::Yellow,
                TrafficLightState::Yellow => TrafficLightState::Green,
                TrafficLightState::Green => TrafficLightState::Red,
            },
        }
    }
}
