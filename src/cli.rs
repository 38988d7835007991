//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Frequent-flyer segmentation report using hierarchical and k-means clustering
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file (first column is the customer identifier)
    #[arg(default_value = "EastWestAirlines.csv")]
    pub input: String,

    /// Enable verbose progress output on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Log filter directive for the tracing subscriber
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "flyer_segments=debug"
        } else {
            "warn"
        }
    }
}
