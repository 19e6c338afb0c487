//! System configuration parameters
//!
//! All tunable parameters for the PestLaser rig.  The defaults are the
//! reference build's compiled-in constants; a JSON override file can
//! replace any of them (see [`crate::adapters::config_file`]).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;
use crate::plane::{Calibration, Coordinate, PlanDimensions};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Plane / camera ---
    /// Camera resolution and aim plane width (pixels)
    pub plane_width: u32,
    /// Camera resolution and aim plane height (pixels)
    pub plane_height: u32,
    /// Still-capture command writing a JPEG to stdout
    pub still_command: String,
    /// JPEG served by the simulated camera (host builds)
    pub sim_frame_path: String,

    // --- Servos ---
    /// Duty-cycle bounds at the plane edges
    pub calibration: Calibration,
    /// BCM GPIO of the horizontal (pan) servo
    pub horizontal_servo_gpio: u8,
    /// BCM GPIO of the vertical (tilt) servo
    pub vertical_servo_gpio: u8,
    /// Servo PWM frequency (Hz)
    pub servo_pwm_freq_hz: f64,

    // --- Inference ---
    /// Pest-detection endpoint (multipart POST)
    pub inference_url: String,

    // --- Timing ---
    /// Pause after every move so the servos reach position (ms)
    pub settle_ms: u32,
    /// Pause after a re-aim before sensing again (ms)
    pub retarget_cooldown_ms: u32,
    /// Pause between inference attempts when no pest is found (ms)
    pub detection_retry_ms: u32,

    // --- Tracking ---
    /// Per-axis distance a pest must move before the laser follows (pixels)
    pub movement_threshold_px: f64,
    /// Where the laser parks at startup
    pub home: Coordinate,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Plane / camera
            plane_width: 640,
            plane_height: 480,
            still_command: "rpicam-still".into(),
            sim_frame_path: "pest.jpg".into(),

            // Servos
            calibration: Calibration::default(),
            horizontal_servo_gpio: pins::HORIZONTAL_SERVO_GPIO,
            vertical_servo_gpio: pins::VERTICAL_SERVO_GPIO,
            servo_pwm_freq_hz: pins::SERVO_PWM_FREQ_HZ,

            // Inference
            inference_url: "http://pjk.local:5000/find_pest".into(),

            // Timing
            settle_ms: 1000,
            retarget_cooldown_ms: 5000,
            detection_retry_ms: 5000,

            // Tracking
            movement_threshold_px: 10.0,
            home: Coordinate::new(0.0, 0.0), // top-left corner
        }
    }
}

impl SystemConfig {
    /// The aim plane.  Only `None` for a config that failed [`validate`](Self::validate).
    pub fn plan(&self) -> Option<PlanDimensions> {
        PlanDimensions::new(self.plane_width, self.plane_height)
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8192).contains(&self.plane_width) {
            return Err(ConfigError::ValidationFailed("plane_width must be 1–8192"));
        }
        if !(1..=8192).contains(&self.plane_height) {
            return Err(ConfigError::ValidationFailed("plane_height must be 1–8192"));
        }

        let cal = &self.calibration;
        for bound in [cal.left, cal.right, cal.top, cal.bottom] {
            if !(0.0..=100.0).contains(&bound) {
                return Err(ConfigError::ValidationFailed(
                    "calibration bounds must be duty-cycle percentages 0.0–100.0",
                ));
            }
        }
        if cal.left == cal.right {
            return Err(ConfigError::ValidationFailed(
                "calibration left and right must differ",
            ));
        }
        if cal.top == cal.bottom {
            return Err(ConfigError::ValidationFailed(
                "calibration top and bottom must differ",
            ));
        }

        if self.horizontal_servo_gpio == self.vertical_servo_gpio {
            return Err(ConfigError::ValidationFailed(
                "servos must be on different GPIOs",
            ));
        }
        if self.horizontal_servo_gpio > 27 || self.vertical_servo_gpio > 27 {
            return Err(ConfigError::ValidationFailed("servo GPIO must be 0–27"));
        }
        if !(10.0..=400.0).contains(&self.servo_pwm_freq_hz) {
            return Err(ConfigError::ValidationFailed(
                "servo_pwm_freq_hz must be 10–400",
            ));
        }

        if !(self.inference_url.starts_with("http://")
            || self.inference_url.starts_with("https://"))
        {
            return Err(ConfigError::ValidationFailed(
                "inference_url must be an http(s) URL",
            ));
        }
        if self.still_command.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("still_command is empty"));
        }

        if self.settle_ms > 60_000 {
            return Err(ConfigError::ValidationFailed("settle_ms must be 0–60000"));
        }
        if self.detection_retry_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "detection_retry_ms must be > 0",
            ));
        }

        if !self.movement_threshold_px.is_finite() || self.movement_threshold_px < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "movement_threshold_px must be a finite value >= 0",
            ));
        }
        if !(self.home.x.is_finite() && self.home.y.is_finite()) {
            return Err(ConfigError::ValidationFailed("home must be finite"));
        }

        Ok(())
    }
}
