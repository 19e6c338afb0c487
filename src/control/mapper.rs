//! Plane coordinate → servo duty-cycle mapping.
//!
//! Straight linear interpolation per axis between the calibrated edge
//! values.  Input is not clamped: a coordinate outside the plane
//! extrapolates past the calibration bounds.

use crate::plane::{ActuatorCommand, Calibration, Coordinate, PlanDimensions};

/// Pure mapping from plane space to servo command space.
#[derive(Debug, Clone, Copy)]
pub struct ActuatorMapper {
    plan: PlanDimensions,
    calibration: Calibration,
}

impl ActuatorMapper {
    pub fn new(plan: PlanDimensions, calibration: Calibration) -> Self {
        Self { plan, calibration }
    }

    pub fn plan(&self) -> PlanDimensions {
        self.plan
    }

    /// Map `target` to a pair of duty-cycle values rounded to 0.1.
    pub fn command_for(&self, target: Coordinate) -> ActuatorCommand {
        let x_percent = target.x / self.plan.width() as f64;
        let y_percent = target.y / self.plan.height() as f64;

        let cal = &self.calibration;
        let horizontal = cal.left - x_percent * (cal.left - cal.right);
        let vertical = cal.top - y_percent * (cal.top - cal.bottom);

        ActuatorCommand {
            horizontal: round_to_tenth(horizontal),
            vertical: round_to_tenth(vertical),
        }
    }
}

/// Servos jitter when fed sub-0.1 % duty changes.
///
/// Rounds the exact binary value.  Scaling by 10 first would itself round,
/// turning e.g. 8.4499999999999993 into a tie that then rounds up.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
