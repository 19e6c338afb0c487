//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ActuatorController / PestLocator / ControlLoop
//! ```
//!
//! Driven adapters (servo channels, camera, inference client, event sinks,
//! config storage) implement these traits.  The core consumes them via
//! generics, so it never touches hardware or the network directly.
//!
//! Delays are not a port of their own: everything that sleeps takes an
//! [`embedded_hal::delay::DelayNs`].

use core::sync::atomic::AtomicBool;

use crate::config::SystemConfig;
use crate::error::{HardwareError, Result};
use crate::plane::{ActuatorCommand, Coordinate, PlanDimensions};

// ───────────────────────────────────────────────────────────────
// Servo channel port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// One periodic pulse-width output line driving one servo.
pub trait ServoChannel {
    /// Claim the line exclusively and configure it for PWM at `frequency_hz`.
    /// No pulses are emitted until the first [`set_duty`](Self::set_duty).
    fn acquire(&mut self, frequency_hz: f64) -> core::result::Result<(), HardwareError>;

    /// (Re)start periodic signalling at `duty_percent` (0–100).
    fn set_duty(&mut self, duty_percent: f64) -> core::result::Result<(), HardwareError>;

    /// Stop signalling and hand the line back to the system.
    fn release(&mut self) -> core::result::Result<(), HardwareError>;
}

// ───────────────────────────────────────────────────────────────
// Camera port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Captures a single still of the plane.
pub trait CameraPort {
    /// Capture one JPEG-encoded frame.
    fn capture_jpeg(&mut self) -> core::result::Result<Vec<u8>, HardwareError>;
}

// ───────────────────────────────────────────────────────────────
// Detector port (driven adapter: domain ↔ inference service)
// ───────────────────────────────────────────────────────────────

/// Remote pest detection.
///
/// `Ok(None)` is a miss, not an error.  Malformed answers surface as
/// [`Error::Protocol`](crate::error::Error::Protocol).
pub trait PestDetector {
    fn detect(&mut self, jpeg: &[u8]) -> Result<Option<Coordinate>>;
}

// ───────────────────────────────────────────────────────────────
// Control-loop seams
// ───────────────────────────────────────────────────────────────

/// Aim the laser.  Implemented by
/// [`ActuatorController`](super::controller::ActuatorController).
pub trait AimPort {
    fn initialize(&mut self, plan: PlanDimensions) -> Result<()>;

    /// Move, wait for the default settle delay, and report what was sent.
    fn move_to(&mut self, target: Coordinate) -> Result<ActuatorCommand>;

    fn cleanup(&mut self) -> Result<()>;
}

/// Blocking source of pest sightings.  Implemented by
/// [`PestLocator`](super::locator::PestLocator).
pub trait PestSource {
    /// Block until a pest is seen.  Returns
    /// [`Error::Interrupted`](crate::error::Error::Interrupted) once
    /// `running` is cleared.
    fn locate_pest(&mut self, running: &AtomicBool) -> Result<Coordinate>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: persistent config → domain)
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.
///
/// Implementations MUST run [`SystemConfig::validate`] before returning.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Returns [`ConfigError::NotFound`] when no override exists; the
    /// caller then falls back to [`SystemConfig::default()`].
    fn load(&self) -> core::result::Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No override configured.
    NotFound,
    /// Override exists but is not valid JSON for [`SystemConfig`].
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Override exists but could not be read.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
