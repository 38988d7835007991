//! Descriptive summaries of features and clusters

use ndarray::{Array1, Array2, Axis};

use crate::partition::Partition;

/// Mean feature vector of each cluster, on the unscaled data
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidTable {
    /// One row per cluster, row `label - 1`
    pub means: Array2<f64>,
    /// Members per cluster, same order as `means`
    pub sizes: Vec<usize>,
}

impl CentroidTable {
    pub fn from_partition(features: &Array2<f64>, partition: &Partition) -> Self {
        let k = partition.k();
        let mut means = Array2::<f64>::zeros((k, features.ncols()));

        for label in 1..=k {
            let members = partition.members(label);
            if let Some(mean) = features.select(Axis(0), &members).mean_axis(Axis(0)) {
                means.row_mut(label - 1).assign(&mean);
            }
        }

        Self {
            means,
            sizes: partition.cluster_sizes(),
        }
    }

    pub fn n_clusters(&self) -> usize {
        self.means.nrows()
    }
}

/// Cluster centroids indexed against the overall feature means
///
/// An index of 100 means the cluster matches the population average for that
/// feature; 200 is twice the average. Features whose overall mean is zero
/// have no index.
#[derive(Debug, Clone)]
pub struct ClusterProfile {
    pub overall_means: Array1<f64>,
    pub indices: Vec<Vec<Option<f64>>>,
}

impl ClusterProfile {
    pub fn new(features: &Array2<f64>, centroids: &CentroidTable) -> Self {
        let overall_means = features
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(features.ncols()));

        let indices = centroids
            .means
            .outer_iter()
            .map(|row| {
                row.iter()
                    .zip(overall_means.iter())
                    .map(|(&c, &m)| (m != 0.0).then(|| 100.0 * c / m))
                    .collect()
            })
            .collect();

        Self {
            overall_means,
            indices,
        }
    }

    /// Feature index with the highest and lowest index for cluster `label`
    pub fn extremes(&self, label: usize) -> Option<(usize, usize)> {
        let row = self.indices.get(label.checked_sub(1)?)?;
        let indexed = row
            .iter()
            .enumerate()
            .filter_map(|(j, v)| v.map(|v| (j, v)));

        let high = indexed.clone().max_by(|a, b| a.1.total_cmp(&b.1))?.0;
        let low = indexed.min_by(|a, b| a.1.total_cmp(&b.1))?.0;
        Some((high, low))
    }
}

/// Basic statistics of one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Min, max, mean and population standard deviation of every column
pub fn describe_columns(features: &Array2<f64>) -> Vec<ColumnSummary> {
    features
        .axis_iter(Axis(1))
        .map(|column| {
            let n = column.len().max(1) as f64;
            let mean = column.sum() / n;
            let variance = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            ColumnSummary {
                min: column.iter().copied().fold(f64::INFINITY, f64::min),
                max: column.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                mean,
                std_dev: variance.sqrt(),
            }
        })
        .collect()
}
