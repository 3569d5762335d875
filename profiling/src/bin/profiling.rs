use rusiaa::{agreement_report, AgreementConfig};
use std::fs;
use std::ops::Range;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

#[derive(Debug, Parser)]
struct Args {
    #[arg(short, long, default_value_t = 1)]
    n_samples: u32,
    /// First annotated text
    first: PathBuf,
    /// Second annotated text
    second: PathBuf,
}

fn main() {
    let args = Args::parse();
    let n_samples = args.n_samples;
    let iter = Range {
        start: 0,
        end: n_samples,
    };
    let first = fs::read_to_string(&args.first).unwrap();
    let second = fs::read_to_string(&args.second).unwrap();
    let config = AgreementConfig::default();
    let mut total_duration = Duration::ZERO;
    for _ in iter {
        let now = Instant::now();
        {
            agreement_report(&first, &second, &config).unwrap();
        }
        let elapsed = now.elapsed();
        total_duration += elapsed;
    }
    println!(
        "Total duration: {} with {n_samples} samples",
        total_duration.as_secs_f64()
    )
}
