//! Single-pass filter, detect and encode pipeline.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::detector::SpikeDetector;
use crate::encoder::PacketEncoder;
use crate::filter::IirFilter;
use crate::packet::{Packet, PacketKind};

/// Packets emitted per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketCounts {
    /// Delta packets
    pub delta: usize,
    /// Run-length packets
    pub run_length: usize,
    /// Spike packets
    pub spike: usize,
    /// Literal packets
    pub literal: usize,
}

impl PacketCounts {
    /// Tally a packet sequence
    #[must_use]
    pub fn from_packets(packets: &[Packet]) -> Self {
        let mut counts = Self::default();
        for p in packets {
            match p.kind() {
                PacketKind::Delta => counts.delta += 1,
                PacketKind::RunLength => counts.run_length += 1,
                PacketKind::Spike => counts.spike += 1,
                PacketKind::Literal => counts.literal += 1,
            }
        }
        counts
    }

    /// Count for one kind
    #[must_use]
    pub const fn get(&self, kind: PacketKind) -> usize {
        match kind {
            PacketKind::Delta => self.delta,
            PacketKind::RunLength => self.run_length,
            PacketKind::Spike => self.spike,
            PacketKind::Literal => self.literal,
        }
    }

    /// Total packets
    #[must_use]
    pub const fn total(&self) -> usize {
        self.delta + self.run_length + self.spike + self.literal
    }
}

/// Summary statistics of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Samples fed to the pipeline
    pub input_samples: usize,
    /// Packets produced, including the final flush
    pub output_packets: usize,
    /// `output_packets / input_samples * 100`, or 0 for empty input
    pub compression_ratio: f64,
    /// Samples flagged as spikes
    pub spike_count: usize,
    /// Breakdown of `output_packets` by kind
    pub packet_counts: PacketCounts,
}

impl PipelineStats {
    fn compute(input_samples: usize, spikes: &[bool], packets: &[Packet]) -> Self {
        let output_packets = packets.len();
        let compression_ratio = if input_samples == 0 {
            0.0
        } else {
            output_packets as f64 / input_samples as f64 * 100.0
        };
        Self {
            input_samples,
            output_packets,
            compression_ratio,
            spike_count: spikes.iter().filter(|&&s| s).count(),
            packet_counts: PacketCounts::from_packets(packets),
        }
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input samples:        {}", self.input_samples)?;
        writeln!(f, "Output packets:       {}", self.output_packets)?;
        writeln!(f, "Compression ratio:    {:.2}%", self.compression_ratio)?;
        writeln!(f, "Spikes detected:      {}", self.spike_count)?;
        writeln!(f)?;
        writeln!(f, "Packet Type Distribution:")?;
        for kind in PacketKind::ALL {
            let label = format!("{}:", kind.name());
            writeln!(f, "  {label:<9} {} packets", self.packet_counts.get(kind))?;
        }
        Ok(())
    }
}

/// Output of [`Pipeline::run`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Filter output, one per input sample
    pub filtered: Vec<i32>,
    /// Spike flag, one per input sample
    pub spikes: Vec<bool>,
    /// Encoded packet stream
    pub packets: Vec<Packet>,
    /// Derived statistics
    pub stats: PipelineStats,
}

/// Reference pipeline: IIR filter, then spike detector, then packet encoder
///
/// Every [`Pipeline::run`] builds fresh component state, so results never
/// depend on earlier runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline. The configuration is taken as is; call
    /// [`PipelineConfig::validate`] first for untrusted input.
    ///
    /// Thresholds are compared as signed values, so a negative detector
    /// threshold flags every sample outside the warm-up and refractory
    /// windows, and a negative RLE threshold never opens a run.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Pipeline configuration
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a complete sample stream
    #[must_use]
    pub fn run(&self, samples: &[i32]) -> PipelineResult {
        tracing::debug!("Running pipeline over {} samples", samples.len());

        let mut filter = IirFilter::new(self.config.coefficients);
        let mut detector = SpikeDetector::new(self.config.detector);
        let mut encoder = PacketEncoder::new(self.config.encoder);

        let mut filtered = Vec::with_capacity(samples.len());
        let mut spikes = Vec::with_capacity(samples.len());
        let mut packets = Vec::new();

        for (index, &sample) in samples.iter().enumerate() {
            let y = filter.filter(sample);
            let is_spike = detector.detect(y, index);
            encoder.encode(y, is_spike, &mut packets);
            filtered.push(y);
            spikes.push(is_spike);
        }
        packets.extend(encoder.flush());

        let stats = PipelineStats::compute(samples.len(), &spikes, &packets);
        tracing::debug!(
            "Pipeline done: {} packets, {} spikes, ratio {:.2}%",
            stats.output_packets,
            stats.spike_count,
            stats.compression_ratio
        );

        PipelineResult {
            filtered,
            spikes,
            packets,
            stats,
        }
    }

    /// Process independent channels in parallel, one pipeline per channel
    ///
    /// Results are in channel order and identical to calling [`Pipeline::run`]
    /// on each channel.
    #[must_use]
    pub fn run_channels(&self, channels: &[Vec<i32>]) -> Vec<PipelineResult> {
        channels.par_iter().map(|samples| self.run(samples)).collect()
    }
}
