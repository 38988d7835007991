//! Silhouette width over a precomputed distance matrix

use crate::distance::DistanceMatrix;
use crate::partition::Partition;

/// Silhouette coefficient of every observation
///
/// For observation `i`, `a` is the mean distance to the other members of its
/// cluster and `b` the smallest mean distance to any other cluster. Members
/// of singleton clusters score 0, as does any point with `a == b == 0`.
pub fn silhouette_samples(distances: &DistanceMatrix, partition: &Partition) -> Vec<f64> {
    let n = partition.len();
    let k = partition.k();
    let sizes = partition.cluster_sizes();
    let mut sums = vec![0.0; k];

    (0..n)
        .map(|i| {
            sums.iter_mut().for_each(|s| *s = 0.0);
            for j in 0..n {
                if i != j {
                    sums[partition.label(j) - 1] += distances.get(i, j);
                }
            }

            let own = partition.label(i) - 1;
            if sizes[own] < 2 {
                return 0.0;
            }

            let a_i = sums[own] / (sizes[own] - 1) as f64;
            let b_i = (0..k)
                .filter(|&c| c != own && sizes[c] > 0)
                .map(|c| sums[c] / sizes[c] as f64)
                .fold(f64::INFINITY, f64::min);

            if b_i.is_infinite() || (a_i == 0.0 && b_i == 0.0) {
                0.0
            } else {
                (b_i - a_i) / a_i.max(b_i)
            }
        })
        .collect()
}

/// Mean silhouette width of a whole partition, in [-1, 1]
pub fn mean_silhouette(distances: &DistanceMatrix, partition: &Partition) -> f64 {
    let samples = silhouette_samples(distances, partition);
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}
