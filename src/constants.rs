//! Hardware constants for the neural compressor datapath.
//!
//! Every value here is a Q16.16 bit pattern or a counter width taken from the
//! RTL parameter block. The configuration structs in [`crate::config`] use
//! these as their defaults.

/// Number of fractional bits in a Q16.16 value
pub const FRAC_BITS: u32 = 16;

/// Q16.16 representation of 1.0
pub const ONE: i32 = 1 << FRAC_BITS;

/// Scale factor between real values and Q16.16 raw values
pub(crate) const SCALE: f64 = 65_536.0;

/// Number of taps in each coefficient bank (4th order filter)
pub const TAPS: usize = 5;

// 4th order bandpass, 1-40 Hz at 160 Hz, as quantized into the coefficient ROM.
// The feedback bank is not stable once quantized; the datapath wraps and so do we.
pub(crate) const HW_B_COEFF: [i32; TAPS] = [
    0x0000_0D6B,  // 0.052414
    0x0000_0000,  // 0
    -0x0000_A5A6, // -0.647064
    0x0000_0000,  // 0
    0x0000_0D6B,  // 0.052414
];

pub(crate) const HW_A_COEFF: [i32; TAPS] = [
    0x0001_0000,  // 1.0
    -0x0002_70A4, // -2.440002
    0x0002_B852,  // 2.720001
    -0x0001_B333, // -1.699997
    0x0000_3D71,  // 0.240005
];

/// Spike threshold, 5.0
pub(crate) const HW_SPIKE_THRESHOLD: i32 = 0x0005_0000;

/// Samples ignored by the detector after reset
pub(crate) const HW_WINDOW_SIZE: usize = 32;

/// Samples suppressed after each detected spike
pub(crate) const HW_REFRACTORY_PERIOD: u32 = 8;

/// Largest delta (exclusive) that extends a run, ~0.1
pub(crate) const HW_RLE_THRESHOLD: i32 = 0x0000_1999;

/// Run counter width is 8 bits
pub(crate) const HW_MAX_RUN_LENGTH: u8 = u8::MAX;

/// Hex digits per line in a sample file
pub(crate) const SAMPLE_HEX_DIGITS: usize = 8;
