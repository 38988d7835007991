//! flyer-segments: frequent-flyer segmentation report
//!
//! Loads the customer table, runs both clustering sweeps and the stability
//! check, then prints the report.

use anyhow::Result;
use clap::Parser;
use flyer_segments::{load_observations, report, run_analysis, AnalysisConfig, Args};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(args.log_directive()))
        .with_writer(std::io::stderr)
        .init();

    let start_time = Instant::now();

    info!(input = %args.input, "Loading observations");
    let table = load_observations(&args.input)?;
    info!(
        customers = table.n_rows(),
        features = table.n_features(),
        "Data loaded"
    );

    let config = AnalysisConfig::default();
    let analysis = run_analysis(&table, &config)?;

    report::print_report(&table, &analysis)?;

    info!(
        seconds = start_time.elapsed().as_secs_f64(),
        "Pipeline complete"
    );
    Ok(())
}
