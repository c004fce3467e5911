//! Dashboard configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use barograph_store::DeviceSet;

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// WebSocket endpoint to connect to.
    pub url: String,
    /// Comma-separated device allow-list. Empty means single-device mode.
    pub devices: String,
    /// Additive calibration offset applied at display time.
    pub calibration_offset: f64,
    /// Rolling buffer capacity shared by every series and the axis.
    pub capacity: usize,
}

/// Default rolling buffer capacity.
pub const DEFAULT_CAPACITY: usize = 240;
/// Largest accepted buffer capacity.
pub const MAX_CAPACITY: usize = 10_000;

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:8080/ws".to_string(),
            devices: String::new(),
            calibration_offset: 0.0,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// The configured device allow-list as a [`DeviceSet`].
    #[must_use]
    pub fn device_set(&self) -> DeviceSet {
        DeviceSet::parse(&self.devices)
    }

    /// Validate the configuration and return any errors.
    ///
    /// This checks:
    /// - The endpoint URL uses a `ws://` or `wss://` scheme
    /// - The buffer capacity is within `1..=10_000`
    /// - The calibration offset is a finite number
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            errors.push(ValidationError {
                field: "url".to_string(),
                message: format!(
                    "invalid endpoint '{}': expected a ws:// or wss:// URL",
                    self.url
                ),
            });
        }

        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            errors.push(ValidationError {
                field: "capacity".to_string(),
                message: format!(
                    "capacity {} is out of range (1-{})",
                    self.capacity, MAX_CAPACITY
                ),
            });
        }

        if !self.calibration_offset.is_finite() {
            errors.push(ValidationError {
                field: "calibration_offset".to_string(),
                message: format!(
                    "calibration offset {} is not a finite number",
                    self.calibration_offset
                ),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field name (e.g. `url` or `capacity`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("barograph")
        .join("dashboard.toml")
}
