//! Complete-linkage agglomerative clustering
//!
//! The merge tree is built once from the condensed distance matrix; every
//! candidate cluster count is then read off by replaying merges, without
//! touching the distances again.

use kodama::{linkage, Method};
use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::partition::Partition;

/// One agglomeration step: the two clusters joined and their distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub height: f64,
}

/// Merge history over `n` observations
///
/// Observations are nodes `0..n`; the cluster created by merge `s` is node
/// `n + s`. Merges are ordered by non-decreasing height.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    observations: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Build the tree with cluster distance = max pairwise member distance
    pub fn complete_linkage(distances: &DistanceMatrix) -> Self {
        let observations = distances.len();
        if observations < 2 {
            return Self {
                observations,
                merges: Vec::new(),
            };
        }

        let mut condensed = distances.condensed().to_vec();
        let tree = linkage(&mut condensed, observations, Method::Complete);
        let merges: Vec<Merge> = tree
            .steps()
            .iter()
            .map(|step| Merge {
                left: step.cluster1,
                right: step.cluster2,
                height: step.dissimilarity,
            })
            .collect();

        debug!(observations, merges = merges.len(), "Dendrogram built");
        Self {
            observations,
            merges,
        }
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Cut the tree so that exactly `k` clusters remain
    pub fn cut(&self, k: usize) -> crate::Result<Partition> {
        let n = self.observations;
        if k == 0 || k > n {
            anyhow::bail!("Cannot cut {} observations into {} clusters", n, k);
        }

        // parent pointers over all 2n - 1 nodes; roots point to themselves
        let mut parent: Vec<usize> = (0..n + self.merges.len()).collect();
        for (step, merge) in self.merges.iter().take(n - k).enumerate() {
            parent[merge.left] = n + step;
            parent[merge.right] = n + step;
        }

        let roots = (0..n).map(|mut node| {
            while parent[node] != node {
                node = parent[node];
            }
            node
        });

        Ok(Partition::from_assignments(roots))
    }
}
