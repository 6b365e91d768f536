//! Events for the traffic light.

use crate::mvi::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficLightEvent {
    /// Advance to the next color.
    Next,
}

impl Event for TrafficLightEvent {}
