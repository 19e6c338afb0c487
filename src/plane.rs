//! Plane geometry shared by the camera and the laser.
//!
//! Pixel space and aim space are the same plane: a detection at pixel
//! `(x, y)` is aimed at by mapping `(x, y)` through the [`Calibration`].

use serde::{Deserialize, Serialize};

/// Logical size of the observable/aimable plane.
///
/// Fixed for the process lifetime.  Construct through [`PlanDimensions::new`]
/// so a zero-sized plane can never reach the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanDimensions {
    width: u32,
    height: u32,
}

impl PlanDimensions {
    /// `None` when either side is zero.
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Midpoint of the plane.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// A target location in plane space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Servo duty-cycle values (percent) at the extreme edges of the plane.
///
/// Found by physically sweeping the rig; `left > right` and `top < bottom`
/// on the reference build but either orientation is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Calibration {
    /// Inclusive `(min, max)` of the horizontal command range.
    pub fn horizontal_range(&self) -> (f64, f64) {
        (self.left.min(self.right), self.left.max(self.right))
    }

    /// Inclusive `(min, max)` of the vertical command range.
    pub fn vertical_range(&self) -> (f64, f64) {
        (self.top.min(self.bottom), self.top.max(self.bottom))
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            left: 9.4,
            right: 5.6,
            top: 5.9,
            bottom: 8.5,
        }
    }
}

/// Duty-cycle values handed to the two servo channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorCommand {
    pub horizontal: f64,
    pub vertical: f64,
}

impl core::fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({:.1},{:.1})", self.horizontal, self.vertical)
    }
}
