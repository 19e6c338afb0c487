//! Camera adapters.
//!
//! - [`StillCamera`] shells out to a libcamera still-capture command
//!   (`rpicam-still` on current Raspberry Pi OS) and reads the JPEG from
//!   its stdout.
//! - [`FileCamera`] serves a JPEG from disk for host-side simulation.

use std::path::PathBuf;
use std::process::Command;

use log::{debug, error};

use crate::app::ports::CameraPort;
use crate::config::SystemConfig;
use crate::error::HardwareError;

/// JPEG start-of-image marker.
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

fn ensure_jpeg(frame: Vec<u8>) -> Result<Vec<u8>, HardwareError> {
    if frame.is_empty() {
        return Err(HardwareError::CaptureFailed);
    }
    if !frame.starts_with(&JPEG_SOI) {
        return Err(HardwareError::NotJpeg);
    }
    Ok(frame)
}

// ── Still-capture command ─────────────────────────────────────

pub struct StillCamera {
    command: String,
    width: u32,
    height: u32,
}

impl StillCamera {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            command: config.still_command.clone(),
            width: config.plane_width,
            height: config.plane_height,
        }
    }
}

impl CameraPort for StillCamera {
    fn capture_jpeg(&mut self) -> Result<Vec<u8>, HardwareError> {
        let output = Command::new(&self.command)
            .args(["--nopreview", "--immediate", "--encoding", "jpg", "--output", "-"])
            .args(["--width", &self.width.to_string()])
            .args(["--height", &self.height.to_string()])
            .output()
            .map_err(|e| {
                error!("camera: failed to run '{}': {}", self.command, e);
                HardwareError::CaptureFailed
            })?;

        if !output.status.success() {
            error!(
                "camera: '{}' exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(HardwareError::CaptureFailed);
        }

        debug!("camera: captured {} bytes", output.stdout.len());
        ensure_jpeg(output.stdout)
    }
}

// ── Simulation ────────────────────────────────────────────────

pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CameraPort for FileCamera {
    fn capture_jpeg(&mut self) -> Result<Vec<u8>, HardwareError> {
        let frame = std::fs::read(&self.path).map_err(|e| {
            error!("camera(sim): cannot read {}: {}", self.path.display(), e);
            HardwareError::CaptureFailed
        })?;
        ensure_jpeg(frame)
    }
}
