//! State for the traffic light.

use crate::mvi::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrafficLightState {
    #[default]
    Red,
    Yellow,
    Green,
}

impl State for TrafficLightState {}

impl TrafficLightState {
    pub fn is_red(&self) -> bool {
        matches!(self, Self::Red)
    }

    pub fn is_yellow(&self) -> bool {
        matches!(self, Self::Yellow)
    }

    pub fn is_green(&self) -> bool {
        matches!(self, Self::Green)
    }
}
