//! Cluster assignments with contiguous 1-based labels

use std::collections::HashMap;

/// Assignment of every observation to exactly one cluster
///
/// Labels are `1..=k` with no gaps. They are arbitrary: label 2 in one
/// partition has nothing to do with label 2 in another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    labels: Vec<usize>,
    k: usize,
}

impl Partition {
    /// Relabel arbitrary cluster keys to `1..=k` in order of first appearance
    pub fn from_assignments<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut mapping: HashMap<usize, usize> = HashMap::new();
        let labels: Vec<usize> = assignments
            .into_iter()
            .map(|key| {
                let next = mapping.len() + 1;
                *mapping.entry(key).or_insert(next)
            })
            .collect();

        Self {
            k: mapping.len(),
            labels,
        }
    }

    /// Number of clusters
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Label of observation `i`
    pub fn label(&self, i: usize) -> usize {
        self.labels[i]
    }

    /// Member count per cluster, indexed by `label - 1`
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k];
        for &label in &self.labels {
            sizes[label - 1] += 1;
        }
        sizes
    }

    /// Cluster sizes as fractions of all observations, largest first
    pub fn sorted_shares(&self) -> Vec<f64> {
        let total = self.labels.len().max(1) as f64;
        let mut shares: Vec<f64> = self
            .cluster_sizes()
            .into_iter()
            .map(|size| size as f64 / total)
            .collect();
        shares.sort_by(|a, b| b.total_cmp(a));
        shares
    }

    /// Row indices carrying `label`
    pub fn members(&self, label: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }
}
