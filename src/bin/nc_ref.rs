//! `nc-ref` - reference model runner for the neural compressor.
//!
//! ```text
//! USAGE:
//!   nc-ref run <input.mem>                         Run the model, print statistics
//!   nc-ref verify <input.mem> --filtered <dut.mem> Diff simulator dumps against the model
//! ```
//!
//! Set `RUST_LOG=debug` for pipeline and file tracing.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neurocomp::samples::{load_sample_file, load_spike_file, save_sample_file, write_spike_flags};
use neurocomp::verify::{compare_flags, compare_samples};
use neurocomp::{write_packets, Pipeline, PipelineConfig, PipelineResult};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nc-ref", about = "Neural compressor reference model", version)]
struct Cli {
    /// JSON configuration overriding the hardware defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the model over a sample file and report statistics.
    Run {
        /// Input sample file (8 hex digits per line).
        input: PathBuf,
        /// Write filtered samples to this file.
        #[arg(long)]
        filtered_out: Option<PathBuf>,
        /// Write spike flags (0/1 per line) to this file.
        #[arg(long)]
        spikes_out: Option<PathBuf>,
        /// Write the packet stream (one packet per line) to this file.
        #[arg(long)]
        packets_out: Option<PathBuf>,
        /// Print statistics as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },
    /// Compare simulator dumps against the model. Exits with status 1 on mismatch.
    Verify {
        /// Input sample file fed to the simulator.
        input: PathBuf,
        /// Filtered samples dumped by the simulator.
        #[arg(long)]
        filtered: PathBuf,
        /// Spike flags dumped by the simulator.
        #[arg(long)]
        spikes: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let pipeline = Pipeline::new(config);

    match cli.command {
        Cmd::Run {
            input,
            filtered_out,
            spikes_out,
            packets_out,
            json,
        } => {
            let result = run_model(&pipeline, &input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result.stats)?);
            } else {
                print_report(&input, &result);
            }
            write_dumps(
                &result,
                filtered_out.as_deref(),
                spikes_out.as_deref(),
                packets_out.as_deref(),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Verify {
            input,
            filtered,
            spikes,
        } => cmd_verify(&pipeline, &input, &filtered, spikes.as_deref()),
    }
}

fn run_model(pipeline: &Pipeline, input: &Path) -> Result<PipelineResult> {
    let samples = load_sample_file(input)
        .with_context(|| format!("Failed to load samples from {}", input.display()))?;
    Ok(pipeline.run(&samples))
}

fn print_report(input: &Path, result: &PipelineResult) {
    let rule = "=".repeat(70);
    println!("{rule}");
    println!("Neural Compressor Reference Model: {}", input.display());
    println!("{rule}");
    print!("{}", result.stats);
    println!("{rule}");
}

fn write_dumps(
    result: &PipelineResult,
    filtered_out: Option<&Path>,
    spikes_out: Option<&Path>,
    packets_out: Option<&Path>,
) -> Result<()> {
    if let Some(path) = filtered_out {
        save_sample_file(path, &result.filtered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Filtered samples: {}", path.display());
    }
    if let Some(path) = spikes_out {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_spike_flags(BufWriter::new(file), &result.spikes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Spike flags:      {}", path.display());
    }
    if let Some(path) = packets_out {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_packets(BufWriter::new(file), &result.packets)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Packets:          {}", path.display());
    }
    Ok(())
}

fn cmd_verify(
    pipeline: &Pipeline,
    input: &Path,
    filtered: &Path,
    spikes: Option<&Path>,
) -> Result<ExitCode> {
    let result = run_model(pipeline, input)?;
    let mut ok = true;

    let dut_filtered = load_sample_file(filtered)
        .with_context(|| format!("Failed to load simulator dump {}", filtered.display()))?;
    let cmp = compare_samples(&result.filtered, &dut_filtered);
    println!("Filtered samples: {cmp}");
    ok &= cmp.is_match();

    if let Some(path) = spikes {
        let dut_spikes = load_spike_file(path)
            .with_context(|| format!("Failed to load simulator dump {}", path.display()))?;
        let cmp = compare_flags(&result.spikes, &dut_spikes);
        println!("Spike flags:      {cmp}");
        ok &= cmp.is_match();
    }

    if ok {
        println!("PASS");
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!("Simulator output diverges from the reference model");
        println!("FAIL");
        Ok(ExitCode::FAILURE)
    }
}
