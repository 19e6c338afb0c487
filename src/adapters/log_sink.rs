//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `env_logger` in the binary).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { home, command } => {
                info!("START | home={} | cmd={}", home, command);
            }
            AppEvent::PestLocated(target) => {
                debug!("SIGHT | at={}", target);
            }
            AppEvent::Aimed { target, command } => {
                info!("AIM   | at={} | cmd={}", target, command);
            }
            AppEvent::Ignored { target, last } => {
                debug!("HOLD  | at={} | last={}", target, last);
            }
            AppEvent::Stopped { iterations, moves } => {
                info!("STOP  | iterations={} | moves={}", iterations, moves);
            }
        }
    }
}
