#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use neurocomp::samples::{read_samples, read_spike_flags, write_samples};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either parse or return an error, never panic
    if let Ok(samples) = read_samples(Cursor::new(data)) {
        // Anything accepted re-serializes to canonical form and parses back the same
        let mut canonical = Vec::new();
        write_samples(&mut canonical, &samples).unwrap();
        let reparsed = read_samples(Cursor::new(&canonical)).unwrap();
        assert_eq!(reparsed, samples, "canonical form changed the samples");
    }
    let _ = read_spike_flags(Cursor::new(data));
});
