//! Error types for the file and configuration boundaries.
//!
//! The datapath itself (filter, detector, encoder, pipeline) cannot fail;
//! only reading sample files and loading configuration return errors.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when reading or writing a sample file
#[derive(Debug, Error)]
pub enum SampleFileError {
    /// Underlying I/O failure
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Line is not a valid hexadecimal number
    #[error("line {line}: invalid hex sample '{content}'")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Offending line, trimmed
        content: String,
    },

    /// Line does not have exactly 8 hex digits
    #[error("line {line}: expected 8 hex digits, got '{content}'")]
    Width {
        /// 1-based line number
        line: usize,
        /// Offending line, trimmed
        content: String,
    },

    /// Spike flag line is neither `0` nor `1`
    #[error("line {line}: expected spike flag 0 or 1, got '{content}'")]
    Flag {
        /// 1-based line number
        line: usize,
        /// Offending line, trimmed
        content: String,
    },
}

/// Error returned when a pipeline configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Feedback bank must be normalized
    #[error("a[0] must be 0x00010000 (1.0), found {found:#010X}")]
    InvalidA0 {
        /// Raw value found in a[0]
        found: u32,
    },

    /// Runs must be allowed at least one sample
    #[error("max_run_length must be at least 1")]
    ZeroMaxRunLength,

    /// Thresholds are magnitudes and cannot be negative
    #[error("{name} must not be negative, got {value}")]
    NegativeThreshold {
        /// Field name
        name: &'static str,
        /// Raw Q16.16 value
        value: i32,
    },

    /// Configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for [`crate::PipelineConfig`]
    #[error("invalid config JSON: {source}")]
    Json {
        /// Underlying serde error
        #[from]
        source: serde_json::Error,
    },
}
