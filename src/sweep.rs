//! Cluster-count sweeps and best-K selection

use std::fmt;

use ndarray::Array2;
use tracing::{debug, warn};

use crate::config::KMeansSettings;
use crate::distance::DistanceMatrix;
use crate::hierarchical::Dendrogram;
use crate::model::fit_kmeans;
use crate::partition::Partition;
use crate::silhouette::mean_silhouette;
use crate::summary::CentroidTable;

/// Clustering algorithm a sweep was run with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Agglomerative, complete linkage
    Hierarchical,
    KMeans,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Hierarchical => write!(f, "hierarchical (complete linkage)"),
            Algorithm::KMeans => write!(f, "k-means"),
        }
    }
}

/// Outcome of clustering for one candidate K
#[derive(Debug, Clone)]
pub struct SweepRecord {
    pub k: usize,
    pub silhouette: f64,
    pub partition: Partition,
    /// Within-cluster sum of squares, k-means only
    pub wcss: Option<f64>,
}

/// Records for every evaluated candidate, in candidate order
#[derive(Debug, Clone)]
pub struct Sweep {
    pub algorithm: Algorithm,
    pub records: Vec<SweepRecord>,
}

impl Sweep {
    /// Record with the strictly largest mean silhouette; ties go to the first
    pub fn select_best(&self) -> crate::Result<&SweepRecord> {
        let mut best: Option<&SweepRecord> = None;
        for record in &self.records {
            if best.map_or(true, |b| record.silhouette > b.silhouette) {
                best = Some(record);
            }
        }
        best.ok_or_else(|| anyhow::anyhow!("{} sweep evaluated no candidates", self.algorithm))
    }
}

/// Best record of a sweep together with its centroid summary
#[derive(Debug, Clone)]
pub struct Selection {
    pub algorithm: Algorithm,
    pub k: usize,
    pub silhouette: f64,
    pub partition: Partition,
    /// Means of the unscaled features per cluster
    pub centroids: CentroidTable,
}

/// Pick the best K of a sweep and summarise its clusters on the original data
pub fn select(sweep: &Sweep, original: &Array2<f64>) -> crate::Result<Selection> {
    let best = sweep.select_best()?;
    if best.partition.len() != original.nrows() {
        anyhow::bail!(
            "Partition covers {} rows but the table has {}",
            best.partition.len(),
            original.nrows()
        );
    }

    Ok(Selection {
        algorithm: sweep.algorithm,
        k: best.k,
        silhouette: best.silhouette,
        partition: best.partition.clone(),
        centroids: CentroidTable::from_partition(original, &best.partition),
    })
}

/// Hierarchical sweep: one dendrogram, cut once per candidate
pub fn sweep_hierarchical(distances: &DistanceMatrix, candidates: &[usize]) -> crate::Result<Sweep> {
    let valid = valid_candidates(candidates, distances.len())?;
    let dendrogram = Dendrogram::complete_linkage(distances);

    let records = valid
        .into_iter()
        .map(|k| {
            let partition = dendrogram.cut(k)?;
            let silhouette = mean_silhouette(distances, &partition);
            debug!(k, silhouette, "Hierarchical candidate evaluated");
            Ok(SweepRecord {
                k,
                silhouette,
                partition,
                wcss: None,
            })
        })
        .collect::<crate::Result<Vec<_>>>()?;

    Ok(Sweep {
        algorithm: Algorithm::Hierarchical,
        records,
    })
}

/// K-means sweep: an independent restarted fit per candidate
///
/// `features` are the scaled coordinates k-means works on; `distances` is the
/// matrix of those same rows, used for the silhouette.
pub fn sweep_kmeans(
    features: &Array2<f64>,
    distances: &DistanceMatrix,
    candidates: &[usize],
    settings: &KMeansSettings,
) -> crate::Result<Sweep> {
    if features.nrows() != distances.len() {
        anyhow::bail!(
            "Distance matrix covers {} rows but the feature table has {}",
            distances.len(),
            features.nrows()
        );
    }
    let valid = valid_candidates(candidates, features.nrows())?;

    let records = valid
        .into_iter()
        .map(|k| {
            let model = fit_kmeans(features, k, settings)?;
            let silhouette = mean_silhouette(distances, &model.partition);
            debug!(k, silhouette, wcss = model.inertia, "K-Means candidate evaluated");
            Ok(SweepRecord {
                k,
                silhouette,
                partition: model.partition,
                wcss: Some(model.inertia),
            })
        })
        .collect::<crate::Result<Vec<_>>>()?;

    Ok(Sweep {
        algorithm: Algorithm::KMeans,
        records,
    })
}

/// Keep candidates with `2 <= k < n`; silhouette is undefined elsewhere
fn valid_candidates(candidates: &[usize], n: usize) -> crate::Result<Vec<usize>> {
    let valid: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&k| {
            let ok = k >= 2 && k < n;
            if !ok {
                warn!(k, observations = n, "Skipping cluster count");
            }
            ok
        })
        .collect();

    if valid.is_empty() {
        anyhow::bail!(
            "No usable cluster count among {:?} for {} observations",
            candidates,
            n
        );
    }
    Ok(valid)
}
