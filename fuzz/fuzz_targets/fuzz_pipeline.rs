#![no_main]

use libfuzzer_sys::fuzz_target;
use neurocomp::{FilterCoefficients, Packet, PacketKind, Pipeline, PipelineConfig};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte selects the filter, the rest are little-endian samples
    let coefficients = if data[0] & 1 == 0 {
        FilterCoefficients::hardware()
    } else {
        FilterCoefficients::passthrough()
    };
    let samples: Vec<i32> = data[1..]
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let pipeline = Pipeline::new(PipelineConfig {
        coefficients,
        ..PipelineConfig::default()
    });
    let result = pipeline.run(&samples);

    // Property 1: one filtered value and one flag per sample
    assert_eq!(result.filtered.len(), samples.len());
    assert_eq!(result.spikes.len(), samples.len());

    // Property 2: packets account for every sample exactly once
    let covered: usize = result.packets.iter().map(Packet::samples_covered).sum();
    assert_eq!(covered, samples.len(), "coverage mismatch");

    // Property 3: spike packets match spike flags, no literals
    let counts = result.stats.packet_counts;
    assert_eq!(counts.spike, result.stats.spike_count);
    assert_eq!(counts.literal, 0);

    // Property 4: runs are never empty
    for p in &result.packets {
        if let Packet::RunLength { count, .. } = p {
            assert!(*count >= 1, "empty run");
        }
        assert_ne!(p.kind(), PacketKind::Literal);
    }

    // Property 5: warm-up window never flags
    assert!(result.spikes.iter().take(32).all(|&s| !s), "spike during warm-up");
});
