//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] owns the tracking state and nothing else.  All I/O
//! flows through port traits injected at call sites, making the loop
//! testable with stub locators and aimers.
//!
//! ```text
//!  PestSource ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      ControlLoop        │
//!    AimPort ◀────│  threshold · cooldown   │
//!                 └────────────────────────┘
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use log::{debug, error, info};

use crate::config::SystemConfig;
use crate::control::tracker::TrackedTarget;
use crate::error::{Error, InitError, Result};
use crate::plane::{ActuatorCommand, Coordinate, PlanDimensions};

use super::events::AppEvent;
use super::ports::{AimPort, EventSink, PestSource};

/// What one sensing cycle did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Laser re-aimed and the cooldown elapsed.
    Aimed { target: Coordinate, command: ActuatorCommand },
    /// Sighting within the threshold on at least one axis; nothing moved.
    Ignored(Coordinate),
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Sightings handled.  An attempt cut short by shutdown is not one.
    pub iterations: u64,
    pub moves: u64,
}

pub struct ControlLoop {
    plan: PlanDimensions,
    home: Coordinate,
    threshold_px: f64,
    cooldown_ms: u32,
    tracked: TrackedTarget,
    stats: LoopStats,
}

impl ControlLoop {
    pub fn new(config: &SystemConfig) -> Result<Self> {
        let plan = config.plan().ok_or(InitError::EmptyPlane)?;
        Ok(Self {
            plan,
            home: config.home,
            threshold_px: config.movement_threshold_px,
            cooldown_ms: config.retarget_cooldown_ms,
            tracked: TrackedTarget::new(),
            stats: LoopStats::default(),
        })
    }

    pub fn tracked(&self) -> TrackedTarget {
        self.tracked
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Initialise the actuators and park the laser at the home coordinate.
    ///
    /// The home move does not update the tracked target: the first
    /// sighting always re-aims.
    pub fn start(&mut self, aim: &mut impl AimPort, sink: &mut impl EventSink) -> Result<()> {
        aim.initialize(self.plan)?;
        let command = aim.move_to(self.home)?;
        sink.emit(&AppEvent::Started {
            home: self.home,
            command,
        });
        Ok(())
    }

    /// Start, track until `running` drops or an error occurs, then release
    /// the actuators.  Cleanup runs on every exit path.
    pub fn run(
        &mut self,
        source: &mut impl PestSource,
        aim: &mut impl AimPort,
        delay: &mut impl DelayNs,
        running: &AtomicBool,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let outcome = match self.start(aim, sink) {
            Ok(()) => self.track(source, aim, delay, running, sink),
            Err(e) => Err(e),
        };

        let released = aim.cleanup();
        sink.emit(&AppEvent::Stopped {
            iterations: self.stats.iterations,
            moves: self.stats.moves,
        });

        match outcome {
            Ok(()) | Err(Error::Interrupted) => released,
            Err(e) => {
                if let Err(release_err) = released {
                    error!("Actuator release after failure also failed: {}", release_err);
                }
                Err(e)
            }
        }
    }

    fn track(
        &mut self,
        source: &mut impl PestSource,
        aim: &mut impl AimPort,
        delay: &mut impl DelayNs,
        running: &AtomicBool,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        while running.load(Ordering::SeqCst) {
            self.step(source, aim, delay, running, sink)?;
        }
        info!("Shutdown requested, leaving control loop");
        Ok(())
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One sensing cycle: locate → threshold → (move → cooldown).
    pub fn step(
        &mut self,
        source: &mut impl PestSource,
        aim: &mut impl AimPort,
        delay: &mut impl DelayNs,
        running: &AtomicBool,
        sink: &mut impl EventSink,
    ) -> Result<StepOutcome> {
        info!("Start locating the pest");
        let target = source.locate_pest(running)?;
        self.stats.iterations += 1;
        sink.emit(&AppEvent::PestLocated(target));

        let last = self.tracked.last();
        if !self.tracked.has_moved(target, self.threshold_px) {
            debug!("Pest at {} too close to last target {}, ignoring", target, last);
            sink.emit(&AppEvent::Ignored { target, last });
            return Ok(StepOutcome::Ignored(target));
        }

        info!("Pest located at position {}", target);
        let command = aim.move_to(target)?;
        self.tracked.update(target);
        self.stats.moves += 1;
        sink.emit(&AppEvent::Aimed { target, command });

        delay.delay_ms(self.cooldown_ms);
        Ok(StepOutcome::Aimed { target, command })
    }
}
