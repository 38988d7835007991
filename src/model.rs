//! K-Means clustering with seeded restarts

use linfa::prelude::*;
use linfa_clustering::KMeans;
use linfa_nn::distance::L2Dist;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::debug;

use crate::config::KMeansSettings;
use crate::partition::Partition;

/// K-Means model wrapper with fitted parameters
#[derive(Debug)]
pub struct KMeansModel {
    /// Number of clusters requested
    pub n_clusters: usize,
    /// Cluster assignments for the training rows
    pub partition: Partition,
    /// Cluster centroids in scaled space, one row per centroid
    pub centroids: Array2<f64>,
    /// Within-cluster sum of squares (inertia) of the kept run
    pub inertia: f64,
}

impl KMeansModel {
    /// Get cluster sizes, indexed by `label - 1`
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.partition.cluster_sizes()
    }
}

/// Fit K-Means on scaled features
///
/// Runs `settings.restarts` independent k-means++ initialisations from a
/// generator seeded with `settings.seed` and keeps the one with the lowest
/// within-cluster sum of squares. The generator is reseeded on every call, so
/// the result for a given `n_clusters` does not depend on earlier fits.
///
/// # Arguments
/// * `features` - Scaled feature matrix (n_samples, n_features)
/// * `n_clusters` - Number of clusters
/// * `settings` - Restarts, iteration limit, tolerance and seed
pub fn fit_kmeans(
    features: &Array2<f64>,
    n_clusters: usize,
    settings: &KMeansSettings,
) -> crate::Result<KMeansModel> {
    if n_clusters == 0 {
        anyhow::bail!("Number of clusters must be positive");
    }

    if features.nrows() < n_clusters {
        anyhow::bail!(
            "Number of data points ({}) must be at least equal to number of clusters ({})",
            features.nrows(),
            n_clusters
        );
    }

    let dataset = DatasetBase::from(features.clone());
    let rng = Xoshiro256Plus::seed_from_u64(settings.seed);

    let model = KMeans::params_with(n_clusters, rng, L2Dist)
        .n_runs(settings.restarts.max(1))
        .max_n_iterations(settings.max_iters)
        .tolerance(settings.tolerance)
        .fit(&dataset)?;

    let assignments: Array1<usize> = model.predict(features);
    let centroids = model.centroids().clone();
    let inertia = compute_inertia(features, &assignments, &centroids);

    let partition = Partition::from_assignments(assignments.iter().copied());
    if partition.k() < n_clusters {
        debug!(
            requested = n_clusters,
            found = partition.k(),
            "K-Means left some clusters empty"
        );
    }

    Ok(KMeansModel {
        n_clusters,
        partition,
        centroids,
        inertia,
    })
}

/// Compute within-cluster sum of squares (inertia)
fn compute_inertia(features: &Array2<f64>, labels: &Array1<usize>, centroids: &Array2<f64>) -> f64 {
    let mut inertia = 0.0;

    for (i, &cluster) in labels.iter().enumerate() {
        if cluster < centroids.nrows() {
            let point = features.row(i);
            let centroid = centroids.row(cluster);
            let distance_sq = point
                .iter()
                .zip(centroid.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>();
            inertia += distance_sq;
        }
    }

    inertia
}
