//! Host delay adapter.
//!
//! Implements [`DelayNs`] on top of `std::thread::sleep`.  The core only
//! ever sees the trait, so tests substitute a recording delay and never
//! actually wait.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

/// Blocking sleep on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl StdDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
