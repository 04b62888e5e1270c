#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use neurocomp::samples::{read_samples, write_samples};

fuzz_target!(|data: &[u8]| {
    // Every 4 bytes is one little-endian Q16.16 sample
    let samples: Vec<i32> = data
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let mut buf = Vec::new();
    write_samples(&mut buf, &samples).unwrap();

    // Property 1: exactly 8 hex digits and a newline per sample
    assert_eq!(buf.len(), samples.len() * 9, "line width mismatch");

    // Property 2: writer emits uppercase only
    assert!(!buf.iter().any(u8::is_ascii_lowercase), "lowercase hex digit");

    // Property 3: bit patterns survive the trip
    let parsed = read_samples(Cursor::new(buf)).unwrap();
    assert_eq!(parsed, samples, "roundtrip mismatch");
});
