//! Q16.16 fixed-point primitives.
//!
//! Values are carried as raw `i32` bit patterns. All arithmetic wraps in 32
//! bits exactly as the hardware multiplier and adders do; nothing here
//! saturates.

use crate::constants::{FRAC_BITS, SCALE};

/// Convert a real value to Q16.16, rounding half to even.
///
/// No range check is performed: values outside the Q16.16 range saturate
/// through the float-to-int cast. Use [`to_fixed_clamped`] when converting
/// recorded data.
#[inline]
#[must_use]
pub fn to_fixed(value: f64) -> i32 {
    (value * SCALE).round_ties_even() as i32
}

/// Convert a real value to Q16.16, clamping to the representable range.
#[inline]
#[must_use]
pub fn to_fixed_clamped(value: f64) -> i32 {
    let scaled = (value * SCALE).round_ties_even();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Convert a Q16.16 value to its real value.
#[inline]
#[must_use]
pub fn to_float(raw: i32) -> f64 {
    f64::from(raw) / SCALE
}

/// Reinterpret a 32-bit pattern (as read from a sample file) as Q16.16.
#[inline]
#[must_use]
pub const fn from_bits(bits: u32) -> i32 {
    bits as i32
}

/// Bit pattern of a Q16.16 value, as written to a sample file.
#[inline]
#[must_use]
pub const fn to_bits(raw: i32) -> u32 {
    raw as u32
}

/// Fixed-point multiply.
///
/// Widens to 64 bits, multiplies, shifts right arithmetically by 16 and keeps
/// the low 32 bits. Overflow wraps silently, matching the RTL multiplier.
#[inline]
#[must_use]
pub const fn mul(a: i32, b: i32) -> i32 {
    ((a as i64 * b as i64) >> FRAC_BITS) as i32
}

/// Fixed-point subtraction, wrapping in 32 bits.
#[inline]
#[must_use]
pub const fn sub(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

/// Magnitude of a Q16.16 value. `i32::MIN` maps to 2^31.
#[inline]
#[must_use]
pub const fn magnitude(raw: i32) -> u32 {
    raw.unsigned_abs()
}
