//! Sample file format.
//!
//! One Q16.16 sample per line, written as exactly 8 uppercase hex digits of
//! the 32-bit two's-complement pattern, newline terminated. No header, no
//! footer. This is the `$readmemh` layout the testbench loads; on read,
//! `//` comment lines and `@addr` directives are skipped, so samples are
//! always taken in file order.
//!
//! ```text
//! 00010000    1.0
//! FFFF0000   -1.0
//! 00001999    0.0999908
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::constants::SAMPLE_HEX_DIGITS;
use crate::error::SampleFileError;
use crate::fixed;

/// Parse samples from a reader
///
/// Surrounding whitespace is trimmed. Blank lines, `//` comment lines and
/// `@addr` lines are skipped. Hex digits of either case are accepted.
///
/// # Errors
/// Returns an error on I/O failure or if a line is not exactly 8 hex digits.
/// A line that is not valid UTF-8 is a [`SampleFileError::Parse`].
pub fn read_samples<R: BufRead>(reader: R) -> Result<Vec<i32>, SampleFileError> {
    let mut samples = Vec::new();
    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = idx + 1;
        let Ok(text) = std::str::from_utf8(&bytes) else {
            return Err(SampleFileError::Parse {
                line,
                content: lossy_trimmed(&bytes),
            });
        };
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('@') {
            continue;
        }
        samples.push(parse_sample(trimmed, line)?);
    }
    Ok(samples)
}

fn lossy_trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_owned()
}

fn parse_sample(token: &str, line: usize) -> Result<i32, SampleFileError> {
    if token.len() != SAMPLE_HEX_DIGITS {
        return Err(SampleFileError::Width {
            line,
            content: token.to_owned(),
        });
    }
    // from_str_radix alone would accept a leading '+'
    if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SampleFileError::Parse {
            line,
            content: token.to_owned(),
        });
    }
    u32::from_str_radix(token, 16)
        .map(fixed::from_bits)
        .map_err(|_| SampleFileError::Parse {
            line,
            content: token.to_owned(),
        })
}

/// Write samples, one 8-digit uppercase hex pattern per line
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_samples<W: Write>(mut out: W, samples: &[i32]) -> Result<(), SampleFileError> {
    for &s in samples {
        writeln!(out, "{:08X}", fixed::to_bits(s))?;
    }
    out.flush()?;
    Ok(())
}

/// Load a sample file from disk
///
/// # Errors
/// See [`read_samples`].
pub fn load_sample_file(path: impl AsRef<Path>) -> Result<Vec<i32>, SampleFileError> {
    let path = path.as_ref();
    let samples = read_samples(BufReader::new(File::open(path)?))?;
    tracing::debug!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Write a sample file to disk, replacing any existing file
///
/// # Errors
/// See [`write_samples`].
pub fn save_sample_file(path: impl AsRef<Path>, samples: &[i32]) -> Result<(), SampleFileError> {
    let path = path.as_ref();
    write_samples(BufWriter::new(File::create(path)?), samples)?;
    tracing::debug!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// Parse spike flags, one `0` or `1` per line
///
/// # Errors
/// Returns an error on I/O failure or any other line content.
pub fn read_spike_flags<R: BufRead>(reader: R) -> Result<Vec<bool>, SampleFileError> {
    let mut flags = Vec::new();
    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        match std::str::from_utf8(&bytes).map(str::trim) {
            Ok("") => {}
            Ok("0") => flags.push(false),
            Ok("1") => flags.push(true),
            _ => {
                return Err(SampleFileError::Flag {
                    line: idx + 1,
                    content: lossy_trimmed(&bytes),
                })
            }
        }
    }
    Ok(flags)
}

/// Write spike flags, one `0` or `1` per line
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_spike_flags<W: Write>(mut out: W, flags: &[bool]) -> Result<(), SampleFileError> {
    for &f in flags {
        writeln!(out, "{}", u8::from(f))?;
    }
    out.flush()?;
    Ok(())
}

/// Quantize real-valued samples to Q16.16, clamping out-of-range values
#[must_use]
pub fn quantize(values: &[f64]) -> Vec<i32> {
    values.iter().map(|&v| fixed::to_fixed_clamped(v)).collect()
}

/// Load a spike flag file from disk
///
/// # Errors
/// See [`read_spike_flags`].
pub fn load_spike_file(path: impl AsRef<Path>) -> Result<Vec<bool>, SampleFileError> {
    let path = path.as_ref();
    let flags = read_spike_flags(BufReader::new(File::open(path)?))?;
    tracing::debug!("Loaded {} spike flags from {}", flags.len(), path.display());
    Ok(flags)
}
