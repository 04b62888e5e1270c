//! Packets produced by the encoder.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::fixed;

/// One encoded packet
///
/// All values are Q16.16 raw patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Packet {
    /// Difference from the previous reference value
    Delta(i32),
    /// `count` consecutive near-identical samples represented by `value`
    RunLength {
        /// Samples covered, never 0
        count: u8,
        /// First sample of the run
        value: i32,
    },
    /// Detected spike, stored verbatim
    Spike(i32),
    /// Verbatim sample.
    ///
    /// Part of the packet format but never emitted by [`crate::PacketEncoder`];
    /// kept until the hardware team confirms whether a literal path exists.
    Literal(i32),
}

/// Packet type tag, numbered as in the packet header's type field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PacketKind {
    /// [`Packet::Delta`]
    Delta = 0,
    /// [`Packet::RunLength`]
    RunLength = 1,
    /// [`Packet::Spike`]
    Spike = 2,
    /// [`Packet::Literal`]
    Literal = 3,
}

impl PacketKind {
    /// All kinds, in type-code order
    pub const ALL: [Self; 4] = [Self::Delta, Self::RunLength, Self::Spike, Self::Literal];

    /// Numeric type code
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Kind for a numeric type code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Delta),
            1 => Some(Self::RunLength),
            2 => Some(Self::Spike),
            3 => Some(Self::Literal),
            _ => None,
        }
    }

    /// Short name used in reports
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Delta => "Delta",
            Self::RunLength => "RLE",
            Self::Spike => "Spike",
            Self::Literal => "Literal",
        }
    }
}

impl Packet {
    /// Type tag of this packet
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        match self {
            Self::Delta(_) => PacketKind::Delta,
            Self::RunLength { .. } => PacketKind::RunLength,
            Self::Spike(_) => PacketKind::Spike,
            Self::Literal(_) => PacketKind::Literal,
        }
    }

    /// Q16.16 payload (the run value for run-length packets)
    #[inline]
    #[must_use]
    pub const fn value(&self) -> i32 {
        match *self {
            Self::Delta(v) | Self::Spike(v) | Self::Literal(v) => v,
            Self::RunLength { value, .. } => value,
        }
    }

    /// Number of input samples this packet accounts for
    #[inline]
    #[must_use]
    pub const fn samples_covered(&self) -> usize {
        match *self {
            Self::RunLength { count, .. } => count as usize,
            Self::Delta(_) | Self::Spike(_) | Self::Literal(_) => 1,
        }
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Delta(v) => write!(f, "DELTA {:08X}", fixed::to_bits(v)),
            Self::RunLength { count, value } => {
                write!(f, "RLE {count} {:08X}", fixed::to_bits(value))
            }
            Self::Spike(v) => write!(f, "SPIKE {:08X}", fixed::to_bits(v)),
            Self::Literal(v) => write!(f, "LIT {:08X}", fixed::to_bits(v)),
        }
    }
}

/// Write one packet per line in the [`Packet`] display format
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_packets<W: Write>(mut out: W, packets: &[Packet]) -> io::Result<()> {
    for p in packets {
        writeln!(out, "{p}")?;
    }
    out.flush()
}
