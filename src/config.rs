//! Pipeline configuration.
//!
//! Each pipeline instance owns its configuration; no thresholds live in
//! module-level state. Defaults reproduce the hardware parameter block, and a
//! JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    HW_A_COEFF, HW_B_COEFF, HW_MAX_RUN_LENGTH, HW_REFRACTORY_PERIOD, HW_RLE_THRESHOLD,
    HW_SPIKE_THRESHOLD, HW_WINDOW_SIZE, ONE, TAPS,
};
use crate::error::ConfigError;

/// Feedforward (`b`) and feedback (`a`) coefficient banks, Q16.16
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCoefficients {
    /// Feedforward taps `b[0..4]`
    pub b: [i32; TAPS],
    /// Feedback taps `a[0..4]`; `a[0]` is always 1.0 and is not used
    pub a: [i32; TAPS],
}

impl FilterCoefficients {
    /// Coefficient ROM of the hardware filter
    #[must_use]
    pub const fn hardware() -> Self {
        Self {
            b: HW_B_COEFF,
            a: HW_A_COEFF,
        }
    }

    /// Identity filter: `y[n] = x[n]`
    #[must_use]
    pub const fn passthrough() -> Self {
        Self {
            b: [ONE, 0, 0, 0, 0],
            a: [ONE, 0, 0, 0, 0],
        }
    }
}

impl Default for FilterCoefficients {
    fn default() -> Self {
        Self::hardware()
    }
}

/// Spike detector parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Magnitude a sample must exceed to be a spike, Q16.16
    pub threshold: i32,
    /// Samples after reset during which detection is disabled
    pub window_size: usize,
    /// Samples suppressed after each spike
    pub refractory_period: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: HW_SPIKE_THRESHOLD,
            window_size: HW_WINDOW_SIZE,
            refractory_period: HW_REFRACTORY_PERIOD,
        }
    }
}

/// Packet encoder parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Deltas with magnitude strictly below this extend a run, Q16.16
    pub rle_threshold: i32,
    /// A run is emitted as soon as it reaches this many samples
    pub max_run_length: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            rle_threshold: HW_RLE_THRESHOLD,
            max_run_length: HW_MAX_RUN_LENGTH,
        }
    }
}

/// Complete configuration of one pipeline instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Filter coefficient banks
    pub coefficients: FilterCoefficients,
    /// Spike detector parameters
    pub detector: DetectorConfig,
    /// Packet encoder parameters
    pub encoder: EncoderConfig,
}

impl PipelineConfig {
    /// Check the configuration against the datapath's constraints
    ///
    /// # Errors
    /// Returns an error if `a[0]` is not 1.0, `max_run_length` is 0, or
    /// either threshold is negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coefficients.a[0] != ONE {
            return Err(ConfigError::InvalidA0 {
                found: self.coefficients.a[0] as u32,
            });
        }
        if self.encoder.max_run_length == 0 {
            return Err(ConfigError::ZeroMaxRunLength);
        }
        if self.detector.threshold < 0 {
            return Err(ConfigError::NegativeThreshold {
                name: "detector.threshold",
                value: self.detector.threshold,
            });
        }
        if self.encoder.rle_threshold < 0 {
            return Err(ConfigError::NegativeThreshold {
                name: "encoder.rle_threshold",
                value: self.encoder.rle_threshold,
            });
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON text
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the result fails [`Self::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`Self::validate`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!("Loaded pipeline config from {}", path.display());
        Ok(config)
    }
}
