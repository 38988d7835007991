//! Pairwise Euclidean distances between observation rows

use ndarray::{Array2, ArrayView1};

/// Symmetric distance matrix stored as its condensed upper triangle
///
/// Entry `(i, j)` with `i < j` lives at
/// `n*i - i*(i+1)/2 + (j - i - 1)`, the layout the linkage routine expects.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    condensed: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise distances between the rows of `features`
    pub fn euclidean(features: &Array2<f64>) -> Self {
        let n = features.nrows();
        let mut condensed = Vec::with_capacity(n * n.saturating_sub(1) / 2);

        for i in 0..n {
            let row_i = features.row(i);
            for j in (i + 1)..n {
                condensed.push(euclidean_distance(&row_i, &features.row(j)));
            }
        }

        Self { n, condensed }
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between observations `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.condensed[self.offset(i, j)],
            std::cmp::Ordering::Greater => self.condensed[self.offset(j, i)],
        }
    }

    pub fn condensed(&self) -> &[f64] {
        &self.condensed
    }

    /// Materialise the full N x N matrix
    pub fn to_dense(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.n, self.n), |(i, j)| self.get(i, j))
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        self.n * i - i * (i + 1) / 2 + (j - i - 1)
    }
}

/// Calculate Euclidean distance between two points
pub fn euclidean_distance(point1: &ArrayView1<f64>, point2: &ArrayView1<f64>) -> f64 {
    point1
        .iter()
        .zip(point2.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_known_distances() {
        let features = array![[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]];
        let distances = DistanceMatrix::euclidean(&features);

        assert_eq!(distances.len(), 3);
        assert_eq!(distances.condensed(), &[5.0, 10.0, 5.0]);
        assert_eq!(distances.get(2, 0), 10.0);
        assert_eq!(distances.get(1, 1), 0.0);
    }

    #[test]
    fn test_single_row() {
        let distances = DistanceMatrix::euclidean(&array![[1.0, 2.0]]);
        assert_eq!(distances.len(), 1);
        assert!(distances.condensed().is_empty());
        assert_eq!(distances.to_dense(), array![[0.0]]);
    }

    proptest! {
        #[test]
        fn dense_matrix_is_symmetric_with_zero_diagonal(
            rows in prop::collection::vec(prop::collection::vec(0.0f64..1.0, 4), 1..25)
        ) {
            let n = rows.len();
            let flat: Vec<f64> = rows.into_iter().flatten().collect();
            let features = Array2::from_shape_vec((n, 4), flat).unwrap();
            let dense = DistanceMatrix::euclidean(&features).to_dense();

            for i in 0..n {
                prop_assert_eq!(dense[[i, i]], 0.0);
                for j in 0..n {
                    prop_assert_eq!(dense[[i, j]], dense[[j, i]]);
                    prop_assert!(dense[[i, j]] >= 0.0);
                }
            }
        }
    }
}
