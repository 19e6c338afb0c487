//! Unified error types for the PestLaser rig.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  The per-subsystem enums are
//! `Copy`; only the malformed inference body and transport messages carry
//! owned data.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the rig funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation was invoked outside the controller's ready window.
    Init(InitError),
    /// A servo channel or the camera could not be acquired, driven or released.
    Hardware(HardwareError),
    /// The inference server answered with something other than `""` or `"X,Y"`.
    Protocol(ProtocolError),
    /// The inference server could not be reached or answered with an HTTP error.
    Comms(CommsError),
    /// The running flag was cleared while waiting (SIGINT / SIGTERM).
    Interrupted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Protocol(e) => write!(f, "protocol: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Interrupted => write!(f, "interrupted by shutdown request"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Move / center requested before `initialize`.
    NotInitialized,
    /// `initialize` called a second time.
    AlreadyInitialized,
    /// Any operation after `cleanup`.
    ShutDown,
    /// Plane width or height is zero.
    EmptyPlane,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "actuators not initialised"),
            Self::AlreadyInitialized => write!(f, "actuators already initialised"),
            Self::ShutDown => write!(f, "actuators already released"),
            Self::EmptyPlane => write!(f, "plane dimensions must be non-zero"),
        }
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware resource errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// GPIO line could not be claimed as an output.
    ChannelUnavailable { gpio: u8 },
    /// PWM duty-cycle write failed.
    PwmWriteFailed { gpio: u8 },
    /// Stopping PWM or handing the line back failed.
    ReleaseFailed { gpio: u8 },
    /// The still-capture command failed or returned no image.
    CaptureFailed,
    /// Captured buffer is not a JPEG.
    NotJpeg,
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelUnavailable { gpio } => write!(f, "GPIO{gpio} unavailable"),
            Self::PwmWriteFailed { gpio } => write!(f, "PWM write on GPIO{gpio} failed"),
            Self::ReleaseFailed { gpio } => write!(f, "release of GPIO{gpio} failed"),
            Self::CaptureFailed => write!(f, "camera capture failed"),
            Self::NotJpeg => write!(f, "captured frame is not a JPEG"),
        }
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Inference protocol errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    pub kind: ProtocolErrorKind,
    /// The offending response body, verbatim.
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolErrorKind {
    /// Body did not contain exactly one comma.
    WrongFieldCount,
    /// One of the two fields is not an integer.
    InvalidInteger,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ProtocolErrorKind::WrongFieldCount => "expected exactly two comma-separated fields",
            ProtocolErrorKind::InvalidInteger => "coordinate is not an integer",
        };
        write!(f, "{what}: {:?}", self.body)
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommsError {
    /// Request could not be built or sent, or the body could not be read.
    RequestFailed(String),
    /// Server answered with a non-success status.
    HttpStatus(u16),
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed(msg) => write!(f, "inference request failed: {msg}"),
            Self::HttpStatus(code) => write!(f, "inference server returned HTTP {code}"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
