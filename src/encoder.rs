//! Multi-mode packet encoder.
//!
//! Near-constant stretches (deltas below `rle_threshold`) coalesce into a
//! single run-length packet. Everything else becomes a delta packet, except
//! detected spikes, which are always emitted on their own and terminate any
//! pending run.

use crate::config::EncoderConfig;
use crate::fixed;
use crate::packet::Packet;

/// Run accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    NoRun,
    Open { value: i32, count: u8 },
}

/// Stateful packet encoder
///
/// Feed every (filtered sample, spike flag) pair to [`PacketEncoder::encode`]
/// in order, then call [`PacketEncoder::flush`] once. Packets are appended to
/// a caller-owned buffer; a single call emits at most two packets.
#[derive(Debug, Clone)]
pub struct PacketEncoder {
    config: EncoderConfig,
    /// Reference value deltas are computed against
    prev_value: i32,
    run: RunState,
}

impl PacketEncoder {
    /// Create an encoder with `prev_value = 0` and no open run
    #[must_use]
    pub const fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            prev_value: 0,
            run: RunState::NoRun,
        }
    }

    /// Encode one sample
    pub fn encode(&mut self, sample: i32, is_spike: bool, out: &mut Vec<Packet>) {
        if is_spike {
            if let Some(p) = self.close_run() {
                out.push(p);
            }
            out.push(Packet::Spike(sample));
            self.prev_value = sample;
            return;
        }

        let delta = fixed::sub(sample, self.prev_value);
        if i64::from(fixed::magnitude(delta)) < i64::from(self.config.rle_threshold) {
            // An open run is always shorter than max_run_length, so no overflow
            let (value, count) = match self.run {
                RunState::NoRun => (sample, 1),
                RunState::Open { value, count } => (value, count.saturating_add(1)),
            };
            self.run = RunState::Open { value, count };

            if count >= self.config.max_run_length {
                if let Some(p) = self.close_run() {
                    out.push(p);
                }
                self.prev_value = value;
            }
        } else {
            if let RunState::Open { value, .. } = self.run {
                if let Some(p) = self.close_run() {
                    out.push(p);
                }
                self.prev_value = value;
            }
            out.push(Packet::Delta(delta));
            self.prev_value = sample;
        }
    }

    /// Encode one sample, returning the emitted packets
    pub fn encode_one(&mut self, sample: i32, is_spike: bool) -> Vec<Packet> {
        let mut out = Vec::with_capacity(2);
        self.encode(sample, is_spike, &mut out);
        out
    }

    /// Emit the pending run, if any. Call once at end of stream.
    pub fn flush(&mut self) -> Option<Packet> {
        self.close_run()
    }

    /// Whether a run is waiting to be emitted
    #[inline]
    #[must_use]
    pub const fn has_open_run(&self) -> bool {
        matches!(self.run, RunState::Open { .. })
    }

    /// Current delta reference value
    #[inline]
    #[must_use]
    pub const fn prev_value(&self) -> i32 {
        self.prev_value
    }

    /// Encoder parameters
    #[must_use]
    pub const fn config(&self) -> &EncoderConfig {
        &self.config
    }

    #[inline]
    fn close_run(&mut self) -> Option<Packet> {
        match std::mem::replace(&mut self.run, RunState::NoRun) {
            RunState::NoRun => None,
            RunState::Open { value, count } => Some(Packet::RunLength { count, value }),
        }
    }
}

impl Default for PacketEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}
