//! pestlaser library.
//!
//! Exposes the pure-logic modules and the host adapters for integration
//! testing.  Raspberry Pi GPIO access is guarded by the `rpi` feature
//! inside each driver; without it the drivers track state in memory.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod plane;

pub mod adapters;
pub mod drivers;
