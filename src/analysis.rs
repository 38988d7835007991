//! End-to-end segmentation pipeline
//!
//! scale -> distance matrix -> hierarchical and k-means sweeps -> selection
//! -> stability rerun. The distance matrix is computed once and shared by both
//! sweeps.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::data::ObservationTable;
use crate::distance::DistanceMatrix;
use crate::scale::{scale_features, ScaledTable};
use crate::stability::{check_stability, StabilityReport};
use crate::sweep::{select, sweep_hierarchical, sweep_kmeans, Selection, Sweep};

/// Everything computed for one run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub scaled: ScaledTable,
    pub hierarchical: Sweep,
    pub hierarchical_best: Selection,
    pub kmeans: Sweep,
    pub kmeans_best: Selection,
    pub stability: StabilityReport,
}

/// Run the whole analysis on a loaded table
pub fn run_analysis(table: &ObservationTable, config: &AnalysisConfig) -> crate::Result<Analysis> {
    let start = Instant::now();

    let scaled = scale_features(&table.features);
    debug!(
        rows = table.n_rows(),
        features = table.n_features(),
        constant = scaled.constant_columns.len(),
        "Features scaled"
    );

    let distances = DistanceMatrix::euclidean(&scaled.features);
    debug!(
        pairs = distances.condensed().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Distance matrix built"
    );

    let hierarchical = sweep_hierarchical(&distances, &config.candidates)?;
    let hierarchical_best = select(&hierarchical, &table.features)?;
    info!(
        k = hierarchical_best.k,
        silhouette = hierarchical_best.silhouette,
        "Hierarchical selection"
    );

    let kmeans = sweep_kmeans(
        &scaled.features,
        &distances,
        &config.candidates,
        &config.kmeans,
    )?;
    let kmeans_best = select(&kmeans, &table.features)?;
    info!(
        k = kmeans_best.k,
        silhouette = kmeans_best.silhouette,
        "K-Means selection"
    );

    let stability = check_stability(
        &scaled,
        &hierarchical_best,
        &config.candidates,
        &config.stability,
    )?;

    debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Analysis complete"
    );

    Ok(Analysis {
        scaled,
        hierarchical,
        hierarchical_best,
        kmeans,
        kmeans_best,
        stability,
    })
}
