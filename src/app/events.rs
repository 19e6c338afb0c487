//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::plane::{ActuatorCommand, Coordinate};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Actuators initialised and parked at the home coordinate.
    Started { home: Coordinate, command: ActuatorCommand },

    /// The locator reported a pest.
    PestLocated(Coordinate),

    /// The laser was re-aimed at a new sighting.
    Aimed { target: Coordinate, command: ActuatorCommand },

    /// Sighting too close to the last target on at least one axis.
    Ignored { target: Coordinate, last: Coordinate },

    /// The loop exited and the actuators were released.
    Stopped { iterations: u64, moves: u64 },
}
