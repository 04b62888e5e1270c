//! `neurocomp` - Bit-exact reference model of a neural-signal compressor
//!
//! Golden model for verifying the compressor RTL. Given the same Q16.16 input
//! stream, it produces the same filtered samples, spike flags and packets as
//! the hardware, bit for bit, so simulator dumps can be diffed against it.
//!
//! # Datapath
//! - **IIR filter**: 4th order direct-form difference equation, Q16.16
//! - **Spike detector**: magnitude threshold with warm-up window and refractory period
//! - **Packet encoder**: run-length, delta and spike packets in a single pass
//!
//! # Fixed-Point Semantics
//!
//! Everything is carried as raw `i32` Q16.16 (`real = raw / 65536`).
//! Multiplication widens to 64 bits, shifts right by 16 and **wraps** to 32
//! bits. Subtraction wraps. Nothing saturates. The model reproduces overflow
//! rather than preventing it; the default coefficients do overflow after a
//! few dozen samples of a unit impulse, exactly as the RTL does.
//!
//! # Example
//! ```
//! use neurocomp::{fixed, Packet, Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let samples = vec![fixed::to_fixed(0.0); 40];
//!
//! let result = pipeline.run(&samples);
//! assert_eq!(result.packets, vec![Packet::RunLength { count: 40, value: 0 }]);
//! assert_eq!(result.stats.compression_ratio, 2.5);
//! ```
//!
//! # Packet Stream
//!
//! | Type | Code | Payload | Emitted when |
//! |------|------|---------|--------------|
//! | Delta | 0 | `sample - prev` | \|delta\| >= `rle_threshold` |
//! | RLE | 1 | `count` (1-255), first value | run broken, spike, 255 samples, or end of stream |
//! | Spike | 2 | sample | detector flags the sample |
//! | Literal | 3 | sample | never (reserved) |
//!
//! ## Encoder Rules
//!
//! For each filtered sample, in order:
//! 1. Spike: close any open run (emit RLE), emit Spike, reference = sample.
//! 2. \|sample - reference\| < `rle_threshold`: open or extend a run. At
//!    `max_run_length` the run is emitted and reference = run value.
//! 3. Otherwise: close any open run (reference = run value), emit Delta of
//!    the difference computed in step 2, reference = sample.
//!
//! At end of stream an open run is emitted once.
//!
//! # Sample Files
//!
//! Input and dump files hold one sample per line as 8 uppercase hex digits of
//! the 32-bit pattern (`$readmemh` format). See [`samples`].

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod constants;
mod detector;
mod encoder;
mod error;
mod filter;
pub mod fixed;
mod packet;
mod pipeline;
pub mod samples;
pub mod verify;

#[cfg(test)]
mod tests;

// Re-export public API
pub use config::{DetectorConfig, EncoderConfig, FilterCoefficients, PipelineConfig};
pub use detector::SpikeDetector;
pub use encoder::PacketEncoder;
pub use error::{ConfigError, SampleFileError};
pub use filter::IirFilter;
pub use packet::{write_packets, Packet, PacketKind};
pub use pipeline::{PacketCounts, Pipeline, PipelineResult, PipelineStats};
