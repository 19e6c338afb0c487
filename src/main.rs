//! pestlaser: aim a servo-mounted laser at pests spotted by a remote
//! inference server.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  StillCamera/FileCamera  HttpDetector   LogEventSink  StdDelay │
//! │  (CameraPort)            (PestDetector) (EventSink)   (DelayNs)│
//! │  PwmServo × 2            JsonConfigFile                        │
//! │  (ServoChannel)          (ConfigPort)                          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  ControlLoop · PestLocator · ActuatorController        │    │
//! │  │  ActuatorMapper · TrackedTarget                        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use log::{info, warn};

use pestlaser::adapters::config_file::JsonConfigFile;
use pestlaser::adapters::inference::HttpDetector;
use pestlaser::adapters::log_sink::LogEventSink;
use pestlaser::adapters::time::StdDelay;
use pestlaser::app::controller::ActuatorController;
use pestlaser::app::locator::PestLocator;
use pestlaser::app::ports::{ConfigError, ConfigPort};
use pestlaser::app::service::ControlLoop;
use pestlaser::config::SystemConfig;
use pestlaser::drivers::servo::PwmServo;

#[cfg(feature = "rpi")]
use pestlaser::adapters::camera::StillCamera;
#[cfg(not(feature = "rpi"))]
use pestlaser::adapters::camera::FileCamera;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    info!("pestlaser v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (override file or defaults) ─────────────────
    let source = JsonConfigFile::from_env();
    let config = match source.load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            info!("No config override, using defaults");
            SystemConfig::default()
        }
        Err(e) => {
            return Err(e).with_context(|| match source.path() {
                Some(p) => format!("loading config from {}", p.display()),
                None => "loading config".to_string(),
            });
        }
    };

    // ── 3. Shutdown signal ────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || {
            warn!("Signal received, stopping");
            running.store(false, Ordering::SeqCst);
        })
        .context("installing signal handler")?;
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut controller = ActuatorController::new(
        PwmServo::new(config.horizontal_servo_gpio),
        PwmServo::new(config.vertical_servo_gpio),
        StdDelay::new(),
        &config,
    );

    #[cfg(feature = "rpi")]
    let camera = StillCamera::new(&config);
    #[cfg(not(feature = "rpi"))]
    let camera = {
        warn!(
            "Built without `rpi`: servos are simulated, frames read from {}",
            config.sim_frame_path
        );
        FileCamera::new(&config.sim_frame_path)
    };

    let detector = HttpDetector::new(config.inference_url.clone())
        .context("building inference client")?;
    info!("Inference server: {}", detector.url());

    let mut locator = PestLocator::new(camera, detector, StdDelay::new(), &config);
    let mut control = ControlLoop::new(&config).context("building control loop")?;
    let mut sink = LogEventSink::new();

    // ── 5. Run until signalled or a fatal error ───────────────
    control
        .run(&mut locator, &mut controller, &mut StdDelay::new(), &running, &mut sink)
        .context("control loop failed")?;

    info!(
        "Exited cleanly after {} detections ({} misses)",
        control.stats().iterations,
        locator.misses()
    );
    Ok(())
}
