//! Hobby-servo PWM channel on a Raspberry Pi GPIO line.
//!
//! One [`PwmServo`] per axis.  Pulses are generated by rppal's software
//! PWM at the configured frame rate; the duty cycle is the servo position.
//!
//! ## Dual-target design
//!
//! With the `rpi` feature: claims the line through rppal and drives real PWM.
//! Without it: tracks state in-memory only.

use log::error;

#[cfg(feature = "rpi")]
use rppal::gpio::{Gpio, OutputPin};

use crate::app::ports::ServoChannel;
use crate::error::HardwareError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServoState {
    /// Line not claimed.
    Released,
    /// Claimed, no pulses yet.
    Idle,
    /// Emitting pulses at `duty_percent`.
    Driving { duty_percent: f64 },
}

pub struct PwmServo {
    gpio: u8,
    frequency_hz: f64,
    state: ServoState,
    #[cfg(feature = "rpi")]
    pin: Option<OutputPin>,
}

impl PwmServo {
    pub fn new(gpio: u8) -> Self {
        Self {
            gpio,
            frequency_hz: 0.0,
            state: ServoState::Released,
            #[cfg(feature = "rpi")]
            pin: None,
        }
    }

    pub fn gpio(&self) -> u8 {
        self.gpio
    }

    pub fn state(&self) -> ServoState {
        self.state
    }

    #[cfg(feature = "rpi")]
    fn claim_hw(&mut self) -> Result<(), HardwareError> {
        let gpio = self.gpio;
        let pin = Gpio::new().and_then(|g| g.get(gpio)).map_err(|e| {
            error!("servo: cannot claim GPIO{}: {}", gpio, e);
            HardwareError::ChannelUnavailable { gpio }
        })?;
        self.pin = Some(pin.into_output_low());
        Ok(())
    }

    #[cfg(not(feature = "rpi"))]
    fn claim_hw(&mut self) -> Result<(), HardwareError> {
        log::debug!("servo(sim): GPIO{} claimed", self.gpio);
        Ok(())
    }

    #[cfg(feature = "rpi")]
    fn write_hw(&mut self, duty_percent: f64) -> Result<(), HardwareError> {
        let gpio = self.gpio;
        let pin = self
            .pin
            .as_mut()
            .ok_or(HardwareError::PwmWriteFailed { gpio })?;
        pin.set_pwm_frequency(self.frequency_hz, duty_percent / 100.0)
            .map_err(|e| {
                error!("servo: PWM write on GPIO{} failed: {}", gpio, e);
                HardwareError::PwmWriteFailed { gpio }
            })
    }

    #[cfg(not(feature = "rpi"))]
    fn write_hw(&mut self, duty_percent: f64) -> Result<(), HardwareError> {
        log::debug!(
            "servo(sim): GPIO{} {:.1}% @ {} Hz",
            self.gpio, duty_percent, self.frequency_hz
        );
        Ok(())
    }

    #[cfg(feature = "rpi")]
    fn release_hw(&mut self) -> Result<(), HardwareError> {
        let gpio = self.gpio;
        if let Some(mut pin) = self.pin.take() {
            // Dropping the pin restores its original mode.
            pin.clear_pwm().map_err(|e| {
                error!("servo: stopping PWM on GPIO{} failed: {}", gpio, e);
                HardwareError::ReleaseFailed { gpio }
            })?;
        }
        Ok(())
    }

    #[cfg(not(feature = "rpi"))]
    fn release_hw(&mut self) -> Result<(), HardwareError> {
        log::debug!("servo(sim): GPIO{} released", self.gpio);
        Ok(())
    }
}

impl ServoChannel for PwmServo {
    fn acquire(&mut self, frequency_hz: f64) -> Result<(), HardwareError> {
        if self.state != ServoState::Released {
            error!("servo: GPIO{} already claimed", self.gpio);
            return Err(HardwareError::ChannelUnavailable { gpio: self.gpio });
        }
        self.frequency_hz = frequency_hz;
        self.claim_hw()?;
        self.state = ServoState::Idle;
        Ok(())
    }

    fn set_duty(&mut self, duty_percent: f64) -> Result<(), HardwareError> {
        if self.state == ServoState::Released {
            return Err(HardwareError::PwmWriteFailed { gpio: self.gpio });
        }
        if !(0.0..=100.0).contains(&duty_percent) {
            error!(
                "servo: duty {}% on GPIO{} is not a valid pulse width",
                duty_percent, self.gpio
            );
            return Err(HardwareError::PwmWriteFailed { gpio: self.gpio });
        }
        self.write_hw(duty_percent)?;
        self.state = ServoState::Driving { duty_percent };
        Ok(())
    }

    fn release(&mut self) -> Result<(), HardwareError> {
        if self.state == ServoState::Released {
            return Ok(());
        }
        self.state = ServoState::Released;
        self.release_hw()
    }
}
