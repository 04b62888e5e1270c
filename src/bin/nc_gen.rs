//! Generate Q16.16 sample files for the neural compressor testbench.

use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use neurocomp::samples::{quantize, save_sample_file};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nc-gen")]
#[command(about = "Generate Q16.16 sample files for the neural compressor")]
#[command(after_help = "CSV FORMAT:\n  \
    When using --csv, the file holds one real-valued sample per line\n  \
    - Lines starting with # are comments\n  \
    - Empty lines are skipped\n  \
    - If a line has several comma-separated fields, the last one is the value\n  \
    - Values are quantized to Q16.16 (round half to even, clamped)")]
struct Args {
    /// Output sample file path
    output: PathBuf,

    /// Input CSV file with real-valued samples (overrides synthesis)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Number of samples to synthesize (default: 1 minute at 160 Hz)
    #[arg(short = 'n', long, default_value = "9600")]
    samples: usize,

    /// Sample rate in Hz
    #[arg(long, default_value = "160")]
    rate: f64,

    /// Peak amplitude of the background rhythm
    #[arg(long, default_value = "1.0")]
    amplitude: f64,

    /// Peak amplitude of uniform noise
    #[arg(long, default_value = "0.05")]
    noise: f64,

    /// Insert occasional large spikes
    #[arg(long)]
    spikes: bool,

    /// Spike amplitude
    #[arg(long, default_value = "8.0")]
    spike_amplitude: f64,

    /// Random seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

/// Read real-valued samples from a CSV file
fn read_csv(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut values = Vec::new();

    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let field = trimmed.rsplit(',').next().unwrap_or(trimmed).trim();
        let value: f64 = match field.parse() {
            Ok(v) => v,
            // Header row
            Err(_) if values.is_empty() && field.chars().any(char::is_alphabetic) => continue,
            Err(e) => bail!("Line {}: invalid value '{}': {}", line_num + 1, field, e),
        };
        values.push(value);
    }

    Ok(values)
}

/// Synthesize a neural-like signal: alpha and beta rhythms plus noise and spikes
fn synthesize(args: &Args, rng: &mut StdRng) -> Vec<f64> {
    let mut values = Vec::with_capacity(args.samples);
    let mut next_spike = rng.random_range(64..640);

    for i in 0..args.samples {
        let t = i as f64 / args.rate;

        // 10 Hz alpha dominant, 22 Hz beta weaker, slow 1.5 Hz drift
        let rhythm = (2.0 * PI * 10.0 * t).sin() * 0.6
            + (2.0 * PI * 22.0 * t).sin() * 0.25
            + (2.0 * PI * 1.5 * t).sin() * 0.15;
        let jitter = if args.noise > 0.0 {
            rng.random_range(-args.noise..=args.noise)
        } else {
            0.0
        };

        let mut v = rhythm * args.amplitude + jitter;

        if args.spikes && i == next_spike {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            v += sign * args.spike_amplitude;
            next_spike += rng.random_range(64..640);
        }

        values.push(v);
    }

    values
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();
    if args.rate <= 0.0 {
        bail!("Sample rate must be positive, got {}", args.rate);
    }

    let (values, from_csv) = if let Some(csv_path) = &args.csv {
        let values = read_csv(csv_path)?;
        println!("Read {} values from CSV...", values.len());
        (values, true)
    } else {
        let seed = args.seed.unwrap_or_else(|| rand::rng().random());
        tracing::info!("Synthesizing with seed {seed}");
        let mut rng = StdRng::seed_from_u64(seed);
        (synthesize(&args, &mut rng), false)
    };

    let samples = quantize(&values);
    let clamped = values
        .iter()
        .filter(|v| !(-32768.0..32768.0).contains(*v))
        .count();
    if clamped > 0 {
        tracing::warn!("{clamped} values outside the Q16.16 range were clamped");
    }

    save_sample_file(&args.output, &samples)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if from_csv {
        println!("Quantized {} samples from CSV", samples.len());
    } else {
        println!("Generated {} samples", samples.len());
    }
    println!("Output: {}", args.output.display());

    Ok(())
}
