//! Simulator configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QCANVAS_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Hard ceiling on circuit width. A 14-qubit dense operator is 2^28 entries
/// (4 GiB of `Complex64`).
pub const HARD_QUBIT_LIMIT: usize = 14;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Circuits wider than this are rejected before any allocation.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,

    /// Amplitudes below this are treated as zero when rendering.
    #[serde(default = "default_zero_tolerance")]
    pub zero_tolerance: f64,

    /// Decimal places in rendered amplitudes.
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Produce the sum-of-terms rendering.
    #[serde(default = "default_true")]
    pub render_state: bool,

    /// Produce the polar rendering.
    #[serde(default = "default_true")]
    pub render_polar: bool,

    /// Produce per-qubit Bloch vectors.
    #[serde(default)]
    pub render_bloch: bool,
}

// Default value functions
fn default_max_qubits() -> usize {
    10
}

fn default_zero_tolerance() -> f64 {
    1e-10
}

fn default_precision() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            zero_tolerance: default_zero_tolerance(),
            precision: default_precision(),
            render_state: true,
            render_polar: true,
            render_bloch: false,
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        let mut config: Self = serde_yaml_ng::from_str(&contents)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without consulting the environment.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Environment variables:
    /// - `QCANVAS_MAX_QUBITS`
    /// - `QCANVAS_ZERO_TOLERANCE`
    /// - `QCANVAS_PRECISION`
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(v) = std::env::var("QCANVAS_MAX_QUBITS") {
            self.max_qubits = parse_env("QCANVAS_MAX_QUBITS", &v)?;
        }
        if let Ok(v) = std::env::var("QCANVAS_ZERO_TOLERANCE") {
            self.zero_tolerance = parse_env("QCANVAS_ZERO_TOLERANCE", &v)?;
        }
        if let Ok(v) = std::env::var("QCANVAS_PRECISION") {
            self.precision = parse_env("QCANVAS_PRECISION", &v)?;
        }
        Ok(())
    }

    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_qubits == 0 || self.max_qubits > HARD_QUBIT_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_qubits must be in 1..={HARD_QUBIT_LIMIT}, got {}",
                self.max_qubits
            )));
        }
        if !(self.zero_tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "zero_tolerance must be positive, got {}",
                self.zero_tolerance
            )));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name}: cannot parse '{value}'")))
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {0}: {1}")]
    Io(String, #[source] std::io::Error),

    /// Config file is not valid YAML for [`SimulatorConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A setting is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
