//! Two-axis actuator controller.
//!
//! Owns both servo channels and the plane they aim across.  Lifecycle:
//!
//! ```text
//!  Uninitialized ──initialize──▶ Ready ──move_to──▶ Moving ──settle──▶ Ready
//!        │                         │
//!        └────────cleanup──────────┴──────────────▶ ShutDown
//! ```
//!
//! Every move blocks for the settle delay before returning; the servos
//! overshoot and oscillate if re-commanded before they arrive.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::config::SystemConfig;
use crate::control::mapper::ActuatorMapper;
use crate::error::{InitError, Result};
use crate::plane::{ActuatorCommand, Calibration, Coordinate, PlanDimensions};

use super::ports::{AimPort, ServoChannel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Ready,
    Moving,
    ShutDown,
}

pub struct ActuatorController<H: ServoChannel, V: ServoChannel, D: DelayNs> {
    horizontal: H,
    vertical: V,
    delay: D,
    calibration: Calibration,
    pwm_freq_hz: f64,
    settle: Duration,
    /// Set by `initialize`; `None` until then.
    mapper: Option<ActuatorMapper>,
    state: ControllerState,
}

impl<H: ServoChannel, V: ServoChannel, D: DelayNs> ActuatorController<H, V, D> {
    /// Build an uninitialised controller.  No hardware is touched until
    /// [`initialize`](Self::initialize).
    pub fn new(horizontal: H, vertical: V, delay: D, config: &SystemConfig) -> Self {
        Self {
            horizontal,
            vertical,
            delay,
            calibration: config.calibration,
            pwm_freq_hz: config.servo_pwm_freq_hz,
            settle: Duration::from_millis(u64::from(config.settle_ms)),
            mapper: None,
            state: ControllerState::Uninitialized,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn plan(&self) -> Option<PlanDimensions> {
        self.mapper.map(|m| m.plan())
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Claim both channels, configure PWM and record the plane.
    pub fn initialize(&mut self, plan: PlanDimensions) -> Result<()> {
        match self.state {
            ControllerState::Uninitialized => {}
            ControllerState::ShutDown => return Err(InitError::ShutDown.into()),
            ControllerState::Ready | ControllerState::Moving => {
                return Err(InitError::AlreadyInitialized.into());
            }
        }

        self.horizontal.acquire(self.pwm_freq_hz)?;
        if let Err(e) = self.vertical.acquire(self.pwm_freq_hz) {
            // Don't leave the pan line claimed with nobody to release it.
            if let Err(release_err) = self.horizontal.release() {
                error!("Horizontal release after failed init: {}", release_err);
            }
            return Err(e.into());
        }

        self.mapper = Some(ActuatorMapper::new(plan, self.calibration));
        self.state = ControllerState::Ready;
        info!(
            "Actuators ready: plane {}x{}, PWM {} Hz",
            plan.width(),
            plan.height(),
            self.pwm_freq_hz
        );
        Ok(())
    }

    /// Stop PWM and release both channels.  Safe to call repeatedly; only
    /// the first call after `initialize` touches the hardware.
    pub fn cleanup(&mut self) -> Result<()> {
        match self.state {
            ControllerState::ShutDown => {
                debug!("Actuators already released");
                return Ok(());
            }
            ControllerState::Uninitialized => {
                self.state = ControllerState::ShutDown;
                return Ok(());
            }
            ControllerState::Ready | ControllerState::Moving => {}
        }

        self.state = ControllerState::ShutDown;
        let h = self.horizontal.release();
        let v = self.vertical.release();
        info!("Actuators released");
        h?;
        v?;
        Ok(())
    }

    // ── Motion ────────────────────────────────────────────────

    /// Aim at the middle of the plane.
    pub fn center(&mut self) -> Result<ActuatorCommand> {
        let plan = self.ready_mapper()?.plan();
        self.move_to(plan.center())
    }

    /// Aim at `target` and wait the configured settle delay.
    pub fn move_to(&mut self, target: Coordinate) -> Result<ActuatorCommand> {
        self.move_to_with_settle(target, self.settle)
    }

    /// Aim at `target` and block for `settle` before returning.
    pub fn move_to_with_settle(
        &mut self,
        target: Coordinate,
        settle: Duration,
    ) -> Result<ActuatorCommand> {
        let command = self.ready_mapper()?.command_for(target);
        debug!("Move laser to {} -> {}", target, command);

        self.state = ControllerState::Moving;
        let driven = self
            .horizontal
            .set_duty(command.horizontal)
            .and_then(|()| self.vertical.set_duty(command.vertical));
        if let Err(e) = driven {
            self.state = ControllerState::Ready;
            return Err(e.into());
        }

        self.delay.delay_ms(u32::try_from(settle.as_millis()).unwrap_or(u32::MAX));
        self.state = ControllerState::Ready;
        Ok(command)
    }

    fn ready_mapper(&self) -> Result<ActuatorMapper> {
        match (self.state, self.mapper) {
            (ControllerState::Ready, Some(mapper)) => Ok(mapper),
            (ControllerState::ShutDown, _) => Err(InitError::ShutDown.into()),
            _ => Err(InitError::NotInitialized.into()),
        }
    }
}

impl<H: ServoChannel, V: ServoChannel, D: DelayNs> AimPort for ActuatorController<H, V, D> {
    fn initialize(&mut self, plan: PlanDimensions) -> Result<()> {
        ActuatorController::initialize(self, plan)
    }

    fn move_to(&mut self, target: Coordinate) -> Result<ActuatorCommand> {
        ActuatorController::move_to(self, target)
    }

    fn cleanup(&mut self) -> Result<()> {
        ActuatorController::cleanup(self)
    }
}

impl<H: ServoChannel, V: ServoChannel, D: DelayNs> Drop for ActuatorController<H, V, D> {
    fn drop(&mut self) {
        if matches!(self.state, ControllerState::Ready | ControllerState::Moving) {
            warn!("ActuatorController dropped while holding servos; releasing");
            if let Err(e) = self.cleanup() {
                error!("Servo release on drop failed: {}", e);
            }
        }
    }
}
