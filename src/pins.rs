//! GPIO assignments for the laser turret (BCM numbering).
//!
//! Single source of truth for the default wiring; [`SystemConfig`]
//! copies these into its defaults so a differently wired rig only needs
//! a config override.
//!
//! [`SystemConfig`]: crate::config::SystemConfig

// ---------------------------------------------------------------------------
// Pan / tilt servos (SG90-class, signal wire straight to the header)
// ---------------------------------------------------------------------------

/// Horizontal (pan) servo signal.
pub const HORIZONTAL_SERVO_GPIO: u8 = 24;
/// Vertical (tilt) servo signal.
pub const VERTICAL_SERVO_GPIO: u8 = 18;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Standard hobby-servo frame rate (20 ms period).
pub const SERVO_PWM_FREQ_HZ: f64 = 50.0;
