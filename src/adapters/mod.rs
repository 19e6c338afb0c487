//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `camera`       | CameraPort         | rpicam-still / JPEG on disk  |
//! | `config_file`  | ConfigPort         | JSON override file           |
//! | `inference`    | PestDetector       | HTTP inference server        |
//! | `log_sink`     | EventSink          | `log` facade                 |
//! | `time`         | DelayNs            | `std::thread::sleep`         |
//!
//! The servo channels live in [`crate::drivers::servo`].

pub mod camera;
pub mod config_file;
pub mod inference;
pub mod log_sink;
pub mod time;
