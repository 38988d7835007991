//! Fixed analysis parameters
//!
//! None of these are exposed on the command line; the run is meant to be
//! reproducible from the input file alone.

use std::ops::RangeInclusive;

/// Seed shared by k-means initialisation and the stability subsample
pub const RANDOM_SEED: u64 = 123;

/// Candidate cluster counts evaluated by both sweeps
pub const CANDIDATE_K: RangeInclusive<usize> = 2..=10;

/// Independent k-means runs per candidate K
pub const KMEANS_RESTARTS: usize = 50;

pub const KMEANS_MAX_ITERS: u64 = 300;

pub const KMEANS_TOLERANCE: f64 = 1e-4;

/// Share of rows dropped for the stability check
pub const STABILITY_DROP_FRACTION: f64 = 0.05;

/// Settings for a single k-means fit
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansSettings {
    pub restarts: usize,
    pub max_iters: u64,
    pub tolerance: f64,
    pub seed: u64,
}

impl Default for KMeansSettings {
    fn default() -> Self {
        Self {
            restarts: KMEANS_RESTARTS,
            max_iters: KMEANS_MAX_ITERS,
            tolerance: KMEANS_TOLERANCE,
            seed: RANDOM_SEED,
        }
    }
}

/// Settings for the subsample robustness diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityConfig {
    pub drop_fraction: f64,
    pub seed: u64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            drop_fraction: STABILITY_DROP_FRACTION,
            seed: RANDOM_SEED,
        }
    }
}

/// Everything the pipeline needs besides the data itself
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub candidates: Vec<usize>,
    pub kmeans: KMeansSettings,
    pub stability: StabilityConfig,
}

impl AnalysisConfig {
    /// Same defaults with a different candidate range
    pub fn with_candidates(candidates: RangeInclusive<usize>) -> Self {
        Self {
            candidates: candidates.collect(),
            ..Self::default()
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            candidates: CANDIDATE_K.collect(),
            kmeans: KMeansSettings::default(),
            stability: StabilityConfig::default(),
        }
    }
}
