//! Subsample robustness check for the hierarchical selection

use rand::seq::index::sample;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::info;

use crate::config::StabilityConfig;
use crate::distance::DistanceMatrix;
use crate::scale::ScaledTable;
use crate::sweep::{sweep_hierarchical, Selection};

/// Comparison of the full-data selection with a reduced-data rerun
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityReport {
    /// Rows dropped before the rerun
    pub removed: usize,
    /// Rows the rerun clustered
    pub remaining: usize,
    pub full_k: usize,
    pub reduced_k: usize,
    pub full_silhouette: f64,
    pub reduced_silhouette: f64,
    /// Cluster shares of the full selection, largest first
    pub full_shares: Vec<f64>,
    /// Cluster shares of the reduced selection, largest first
    pub reduced_shares: Vec<f64>,
}

impl StabilityReport {
    /// Selected K moved by at most one
    pub fn is_stable(&self) -> bool {
        self.full_k.abs_diff(self.reduced_k) <= 1
    }

    /// Largest change in a (rank-matched) cluster share, when K agrees
    pub fn max_share_shift(&self) -> Option<f64> {
        if self.full_k != self.reduced_k {
            return None;
        }
        self.full_shares
            .iter()
            .zip(&self.reduced_shares)
            .map(|(a, b)| (a - b).abs())
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.max(d))))
    }
}

/// Drop a seeded random share of rows and rerun the hierarchical selection
///
/// The reduced table keeps the scaling of the full one; only rows are
/// removed. `full` must be the hierarchical selection on the same table.
pub fn check_stability(
    scaled: &ScaledTable,
    full: &Selection,
    candidates: &[usize],
    config: &StabilityConfig,
) -> crate::Result<StabilityReport> {
    let n = scaled.features.nrows();
    if !(0.0..1.0).contains(&config.drop_fraction) {
        anyhow::bail!(
            "Drop fraction must be in [0, 1), got {}",
            config.drop_fraction
        );
    }

    let removed = ((n as f64) * config.drop_fraction).round() as usize;
    let removed = removed.min(n.saturating_sub(3));

    let mut rng = Xoshiro256Plus::seed_from_u64(config.seed);
    let mut dropped = vec![false; n];
    for row in sample(&mut rng, n, removed) {
        dropped[row] = true;
    }
    let kept: Vec<usize> = (0..n).filter(|&i| !dropped[i]).collect();

    let reduced = scaled.select_rows(&kept);
    let distances = DistanceMatrix::euclidean(&reduced.features);
    let sweep = sweep_hierarchical(&distances, candidates)?;
    let best = sweep.select_best()?;

    info!(
        removed,
        full_k = full.k,
        reduced_k = best.k,
        "Stability rerun finished"
    );

    Ok(StabilityReport {
        removed,
        remaining: kept.len(),
        full_k: full.k,
        reduced_k: best.k,
        full_silhouette: full.silhouette,
        reduced_silhouette: best.silhouette,
        full_shares: full.partition.sorted_shares(),
        reduced_shares: best.partition.sorted_shares(),
    })
}
