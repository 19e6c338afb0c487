//! Application core: aiming, locating and the control loop.
//!
//! Business rules for the PestLaser rig: actuator lifecycle, the
//! locate-until-found retry loop, and the re-aim threshold.  All
//! interaction with hardware and the network happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod controller;
pub mod events;
pub mod locator;
pub mod ports;
pub mod service;
