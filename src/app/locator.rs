//! Pest locator: capture, ask the inference server, repeat until found.
//!
//! A miss is not an error: the locator sleeps the retry delay and takes a
//! fresh picture, forever.  The only ways out are a sighting, a fatal
//! error (camera, transport, malformed answer) or the running flag
//! dropping.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::SystemConfig;
use crate::error::{Error, Result};
use crate::plane::Coordinate;

use super::ports::{CameraPort, PestDetector, PestSource};

pub struct PestLocator<C: CameraPort, P: PestDetector, D: DelayNs> {
    camera: C,
    detector: P,
    delay: D,
    retry_delay_ms: u32,
    /// Total empty answers since construction.
    misses: u64,
}

impl<C: CameraPort, P: PestDetector, D: DelayNs> PestLocator<C, P, D> {
    pub fn new(camera: C, detector: P, delay: D, config: &SystemConfig) -> Self {
        Self {
            camera,
            detector,
            delay,
            retry_delay_ms: config.detection_retry_ms,
            misses: 0,
        }
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Block until the inference server reports a pest.
    pub fn locate_pest(&mut self, running: &AtomicBool) -> Result<Coordinate> {
        let mut attempt: u32 = 0;
        loop {
            if !running.load(Ordering::SeqCst) {
                return Err(Error::Interrupted);
            }
            attempt += 1;

            let frame = self.camera.capture_jpeg()?;
            debug!(
                "Request inference server (attempt {}, {} byte frame)",
                attempt,
                frame.len()
            );

            if let Some(target) = self.detector.detect(&frame)? {
                info!("Pest found at {} after {} attempt(s)", target, attempt);
                return Ok(target);
            }

            self.misses += 1;
            debug!("No pest in frame, retrying in {} ms", self.retry_delay_ms);
            self.delay.delay_ms(self.retry_delay_ms);
        }
    }
}

impl<C: CameraPort, P: PestDetector, D: DelayNs> PestSource for PestLocator<C, P, D> {
    fn locate_pest(&mut self, running: &AtomicBool) -> Result<Coordinate> {
        PestLocator::locate_pest(self, running)
    }
}
