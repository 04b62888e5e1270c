use std::io::Cursor;

use crate::fixed;
use crate::samples::{read_samples, write_samples};
use crate::{
    EncoderConfig, FilterCoefficients, Packet, PacketEncoder, PacketKind, Pipeline,
    PipelineConfig,
};
use proptest::prelude::*;

prop_compose! {
    /// Low-amplitude signal with occasional large excursions, in Q16.16
    fn arb_signal()(
        count in 0usize..700,
    )(
        samples in prop::collection::vec(
            prop_oneof![
                8 => -0x2000i32..0x2000,
                2 => -0x000A_0000i32..0x000A_0000,
                1 => any::<i32>(),
            ],
            count,
        ),
    ) -> Vec<i32> {
        samples
    }
}

fn arb_coefficients() -> impl Strategy<Value = FilterCoefficients> {
    prop_oneof![
        Just(FilterCoefficients::hardware()),
        Just(FilterCoefficients::passthrough()),
    ]
}

proptest! {
    /// Property: Q16.16 values survive a trip through f64 unchanged
    #[test]
    fn prop_fixed_float_roundtrip(v in any::<i32>()) {
        prop_assert_eq!(fixed::to_fixed(fixed::to_float(v)), v);
    }

    /// Property: mul keeps bits 16..48 of the exact product
    #[test]
    fn prop_mul_matches_wide_reference(a in any::<i32>(), b in any::<i32>()) {
        let exact = i128::from(a) * i128::from(b);
        let expected = ((exact >> 16) & 0xFFFF_FFFF) as u32 as i32;
        prop_assert_eq!(fixed::mul(a, b), expected);
    }

    /// Property: integer threshold tests agree with the real-valued comparisons
    #[test]
    fn prop_integer_thresholds_match_float(v in prop_oneof![
        any::<i32>(),
        -0x0005_0002i32..-0x0004_fffe,
        0x0004_fffei32..0x0005_0002,
        -0x199bi32..-0x1997,
        0x1997i32..0x199b,
        Just(i32::MIN),
        Just(i32::MAX),
    ]) {
        let spike_threshold = fixed::to_float(0x0005_0000);
        let rle_threshold = fixed::to_float(0x0000_1999);
        prop_assert_eq!(
            fixed::magnitude(v) > 0x0005_0000,
            fixed::to_float(v).abs() > spike_threshold
        );
        prop_assert_eq!(
            fixed::magnitude(v) < 0x0000_1999,
            fixed::to_float(v).abs() < rle_threshold
        );
    }

    /// Property: one filtered value and one spike flag per input sample
    #[test]
    fn prop_outputs_align_with_input(samples in arb_signal(), coeff in arb_coefficients()) {
        let config = PipelineConfig { coefficients: coeff, ..PipelineConfig::default() };
        let result = Pipeline::new(config).run(&samples);
        prop_assert_eq!(result.filtered.len(), samples.len());
        prop_assert_eq!(result.spikes.len(), samples.len());
        prop_assert_eq!(result.stats.input_samples, samples.len());
        prop_assert_eq!(result.stats.output_packets, result.packets.len());
    }

    /// Property: every sample is accounted for by exactly one packet
    #[test]
    fn prop_packets_cover_every_sample(samples in arb_signal(), coeff in arb_coefficients()) {
        let config = PipelineConfig { coefficients: coeff, ..PipelineConfig::default() };
        let result = Pipeline::new(config).run(&samples);
        let covered: usize = result.packets.iter().map(Packet::samples_covered).sum();
        prop_assert_eq!(covered, samples.len());
    }

    /// Property: each spike flag yields exactly one spike packet, and no
    /// literal packet is ever produced
    #[test]
    fn prop_spikes_map_to_spike_packets(samples in arb_signal(), coeff in arb_coefficients()) {
        let config = PipelineConfig { coefficients: coeff, ..PipelineConfig::default() };
        let result = Pipeline::new(config).run(&samples);
        let counts = result.stats.packet_counts;
        prop_assert_eq!(counts.spike, result.stats.spike_count);
        prop_assert_eq!(counts.literal, 0);
        prop_assert_eq!(counts.total(), result.packets.len());
        prop_assert!(result.packets.len() >= result.stats.spike_count);

        let spike_values: Vec<i32> = result.packets.iter()
            .filter(|p| p.kind() == PacketKind::Spike)
            .map(Packet::value)
            .collect();
        let flagged_values: Vec<i32> = result.filtered.iter().zip(&result.spikes)
            .filter(|(_, &s)| s)
            .map(|(&y, _)| y)
            .collect();
        prop_assert_eq!(spike_values, flagged_values);
    }

    /// Property: warm-up and refractory windows are honored
    #[test]
    fn prop_spike_spacing(samples in arb_signal(), coeff in arb_coefficients()) {
        let config = PipelineConfig { coefficients: coeff, ..PipelineConfig::default() };
        let result = Pipeline::new(config).run(&samples);
        prop_assert!(result.spikes.iter().take(32).all(|&s| !s));

        let flagged: Vec<usize> = (0..result.spikes.len()).filter(|&i| result.spikes[i]).collect();
        for pair in flagged.windows(2) {
            prop_assert!(pair[1] - pair[0] > 8, "spikes at {} and {}", pair[0], pair[1]);
        }
    }

    /// Property: run lengths stay within [1, max_run_length]
    #[test]
    fn prop_run_lengths_bounded(samples in arb_signal(), max_run in 1u8..=255) {
        let mut enc = PacketEncoder::new(EncoderConfig {
            max_run_length: max_run,
            ..EncoderConfig::default()
        });
        let mut packets = Vec::new();
        for &s in &samples {
            enc.encode(s, false, &mut packets);
        }
        packets.extend(enc.flush());
        prop_assert!(!enc.has_open_run());

        for p in &packets {
            if let Packet::RunLength { count, .. } = *p {
                prop_assert!(count >= 1 && count <= max_run, "run of {}", count);
            }
        }
    }

    /// Property: the pipeline is deterministic
    #[test]
    fn prop_deterministic(samples in arb_signal()) {
        let pipeline = Pipeline::default();
        prop_assert_eq!(pipeline.run(&samples), pipeline.run(&samples));
    }

    /// Property: sample files reproduce the exact 32-bit patterns
    #[test]
    fn prop_sample_file_roundtrip(samples in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut buf = Vec::new();
        write_samples(&mut buf, &samples).unwrap();
        prop_assert_eq!(buf.len(), samples.len() * 9);
        let parsed = read_samples(Cursor::new(buf)).unwrap();
        prop_assert_eq!(parsed, samples);
    }
}
