//! Bit-exact comparison of a simulator dump against the reference output.

use std::fmt;

use serde::Serialize;

use crate::fixed;

/// First position where two streams disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch<T> {
    /// Zero-based sample index
    pub index: usize,
    /// Reference value
    pub expected: T,
    /// Value under test
    pub actual: T,
}

/// Result of comparing two streams element by element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison<T> {
    /// Elements compared (length of the shorter stream)
    pub compared: usize,
    /// Elements that differ within the compared range
    pub mismatches: usize,
    /// First differing element, if any
    pub first_mismatch: Option<Mismatch<T>>,
    /// Length of the reference stream
    pub expected_len: usize,
    /// Length of the stream under test
    pub actual_len: usize,
}

impl<T> Comparison<T> {
    /// Streams have the same length and no element differs
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.mismatches == 0 && self.expected_len == self.actual_len
    }

    /// Streams differ in length
    #[must_use]
    pub const fn length_mismatch(&self) -> bool {
        self.expected_len != self.actual_len
    }
}

fn compare<T: Copy + PartialEq>(expected: &[T], actual: &[T]) -> Comparison<T> {
    let mut mismatches = 0;
    let mut first_mismatch = None;
    for (index, (&e, &a)) in expected.iter().zip(actual).enumerate() {
        if e != a {
            mismatches += 1;
            if first_mismatch.is_none() {
                first_mismatch = Some(Mismatch {
                    index,
                    expected: e,
                    actual: a,
                });
            }
        }
    }
    Comparison {
        compared: expected.len().min(actual.len()),
        mismatches,
        first_mismatch,
        expected_len: expected.len(),
        actual_len: actual.len(),
    }
}

/// Compare Q16.16 sample streams bit for bit
#[must_use]
pub fn compare_samples(expected: &[i32], actual: &[i32]) -> Comparison<i32> {
    compare(expected, actual)
}

/// Compare spike flag streams
#[must_use]
pub fn compare_flags(expected: &[bool], actual: &[bool]) -> Comparison<bool> {
    compare(expected, actual)
}

impl fmt::Display for Comparison<i32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(f, self)?;
        if let Some(m) = self.first_mismatch {
            write!(
                f,
                "; first at sample {}: expected {:08X}, got {:08X}",
                m.index,
                fixed::to_bits(m.expected),
                fixed::to_bits(m.actual)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Comparison<bool> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(f, self)?;
        if let Some(m) = self.first_mismatch {
            write!(
                f,
                "; first at sample {}: expected {}, got {}",
                m.index,
                u8::from(m.expected),
                u8::from(m.actual)
            )?;
        }
        Ok(())
    }
}

fn write_summary<T>(f: &mut fmt::Formatter<'_>, c: &Comparison<T>) -> fmt::Result {
    if c.is_match() {
        return write!(f, "MATCH ({} samples)", c.compared);
    }
    write!(f, "MISMATCH: {} of {} samples differ", c.mismatches, c.compared)?;
    if c.length_mismatch() {
        write!(f, ", length {} vs {}", c.expected_len, c.actual_len)?;
    }
    Ok(())
}
