//! CLI tool for inspecting raw LD06 byte captures.
//!
//! Decodes a capture file and reports frame, measurement and sweep
//! statistics, optionally running the quality filter and line detector
//! over each sweep.
//!
//! # Usage
//!
//! ```bash
//! sweep_dump capture.bin
//! sweep_dump --min-confidence 150 --lines capture.bin
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vastu_loc::io::packet::FRAME_LEN;
use vastu_loc::{
    LineDetector, LineDetectorConfig, Measurement, MeasurementFilter, MeasurementFilterConfig,
    PacketDecoder,
};

/// Decode an LD06 byte capture and summarize its contents.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Raw byte capture to decode.
    capture: PathBuf,

    /// Confidence threshold for the quality filter.
    #[arg(long, default_value_t = 100)]
    min_confidence: u8,

    /// Also extract line features per sweep.
    #[arg(long)]
    lines: bool,

    /// Bearing gap (degrees) that splits a cluster during extraction.
    #[arg(long, default_value_t = 5.0)]
    gap_tolerance: f32,

    /// RNG seed for RANSAC extraction; 0 seeds from OS entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(&args.capture)?;

    let mut decoder = PacketDecoder::new();
    let mut measurements = Vec::new();
    decoder.feed(&bytes, &mut measurements);

    println!(
        "Frames:       {} decoded, {} dropped ({} bytes each)",
        decoder.frames_decoded(),
        decoder.frames_dropped(),
        FRAME_LEN
    );
    println!(
        "Bytes:        {} consumed of {} read",
        decoder.bytes_consumed(),
        bytes.len()
    );

    if measurements.is_empty() {
        println!("Measurements: 0");
        return Ok(());
    }

    let mean_range: f64 = measurements
        .iter()
        .map(|m| f64::from(m.distance_m()))
        .sum::<f64>()
        / measurements.len() as f64;
    let mean_confidence: f64 = measurements
        .iter()
        .map(|m| f64::from(m.confidence))
        .sum::<f64>()
        / measurements.len() as f64;
    println!(
        "Measurements: {} (mean range {:.2} m, mean confidence {:.1})",
        measurements.len(),
        mean_range,
        mean_confidence
    );

    let sweeps = split_sweeps(&measurements);
    println!("Sweeps:       {}", sweeps.len());

    let filter = MeasurementFilter::new(MeasurementFilterConfig {
        confidence_threshold: args.min_confidence,
        ..Default::default()
    });
    let kept: usize = sweeps.iter().map(|s| filter.apply(s).len()).sum();
    println!(
        "Kept:         {} after filtering (threshold {})",
        kept, args.min_confidence
    );

    if args.lines {
        let detector = LineDetector::new(
            LineDetectorConfig::new().with_gap_tolerance_deg(args.gap_tolerance),
        );
        let mut rng = if args.seed == 0 {
            StdRng::from_os_rng()
        } else {
            StdRng::seed_from_u64(args.seed)
        };

        let mut line_count = 0usize;
        let mut supporting = 0usize;
        for sweep in &sweeps {
            for line in detector.detect(&filter.apply(sweep), &mut rng) {
                line_count += 1;
                supporting += line.point_count;
            }
        }
        if line_count > 0 {
            println!(
                "Lines:        {} ({:.1} samples each on average)",
                line_count,
                supporting as f64 / line_count as f64
            );
        } else {
            println!("Lines:        0");
        }
    }

    Ok(())
}

/// Cut the measurement stream into sweeps at bearing wrap-around.
fn split_sweeps(measurements: &[Measurement]) -> Vec<Vec<Measurement>> {
    let mut sweeps = Vec::new();
    let mut current: Vec<Measurement> = Vec::new();
    for m in measurements {
        if let Some(last) = current.last() {
            if m.angle_deg < last.angle_deg {
                sweeps.push(std::mem::take(&mut current));
            }
        }
        current.push(*m);
    }
    if !current.is_empty() {
        sweeps.push(current);
    }
    sweeps
}
