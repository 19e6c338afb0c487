//! JSON config override adapter.
//!
//! Implements [`ConfigPort`].  The override file is optional: when the
//! `PESTLASER_CONFIG` environment variable is unset or names a missing
//! file, [`ConfigError::NotFound`] tells the caller to use the compiled-in
//! defaults.  Fields absent from the file keep their default values.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;

/// Environment variable naming the override file.
pub const CONFIG_ENV_VAR: &str = "PESTLASER_CONFIG";

pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Use the file named by `PESTLASER_CONFIG`, if any.
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let Some(path) = &self.path else {
            return Err(ConfigError::NotFound);
        };

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Config override {} does not exist", path.display());
                return Err(ConfigError::NotFound);
            }
            Err(e) => {
                warn!("Config override {} unreadable: {}", path.display(), e);
                return Err(ConfigError::IoError);
            }
        };

        let config: SystemConfig = serde_json::from_str(&raw).map_err(|e| {
            warn!("Config override {} is not valid: {}", path.display(), e);
            ConfigError::Corrupted
        })?;
        config.validate()?;

        info!("Config override loaded from {}", path.display());
        Ok(config)
    }
}
