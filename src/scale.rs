//! Min-max feature scaling

use ndarray::{Array2, Axis};
use tracing::warn;

/// Feature table rescaled column-wise into [0, 1]
#[derive(Debug, Clone)]
pub struct ScaledTable {
    /// Scaled values, same shape as the input
    pub features: Array2<f64>,
    /// Per-column minimum of the input
    pub mins: Vec<f64>,
    /// Per-column maximum of the input
    pub maxs: Vec<f64>,
    /// Columns with zero range, emitted as all zeros
    pub constant_columns: Vec<usize>,
}

impl ScaledTable {
    /// Restrict to the given rows, keeping the original scaling parameters
    pub fn select_rows(&self, rows: &[usize]) -> ScaledTable {
        ScaledTable {
            features: self.features.select(Axis(0), rows),
            mins: self.mins.clone(),
            maxs: self.maxs.clone(),
            constant_columns: self.constant_columns.clone(),
        }
    }
}

/// Rescale every column as `(x - min) / (max - min)`
///
/// A column whose range is zero cannot be divided through; it is mapped to
/// all zeros and reported in `constant_columns`.
pub fn scale_features(features: &Array2<f64>) -> ScaledTable {
    let n_cols = features.ncols();
    let mut scaled = features.clone();
    let mut mins = Vec::with_capacity(n_cols);
    let mut maxs = Vec::with_capacity(n_cols);
    let mut constant_columns = Vec::new();

    for (j, mut column) in scaled.axis_iter_mut(Axis(1)).enumerate() {
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        if range > 0.0 && range.is_finite() {
            column.mapv_inplace(|x| (x - min) / range);
        } else {
            warn!(column = j, value = min, "Zero-variance column scaled to 0");
            column.fill(0.0);
            constant_columns.push(j);
        }

        mins.push(min);
        maxs.push(max);
    }

    ScaledTable {
        features: scaled,
        mins,
        maxs,
        constant_columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_scale_features() {
        let features = array![[1.0, 10.0], [3.0, 20.0], [5.0, 30.0]];
        let scaled = scale_features(&features);

        assert_eq!(scaled.features, array![[0.0, 0.0], [0.5, 0.5], [1.0, 1.0]]);
        assert_eq!(scaled.mins, vec![1.0, 10.0]);
        assert_eq!(scaled.maxs, vec![5.0, 30.0]);
        assert!(scaled.constant_columns.is_empty());
    }

    #[test]
    fn test_constant_column_becomes_zero() {
        let features = array![[1.0, 7.0], [2.0, 7.0], [4.0, 7.0]];
        let scaled = scale_features(&features);

        assert_eq!(scaled.constant_columns, vec![1]);
        assert!(scaled.features.column(1).iter().all(|&v| v == 0.0));
        assert!(scaled.features.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_select_rows() {
        let features = array![[0.0], [5.0], [10.0]];
        let scaled = scale_features(&features);
        let subset = scaled.select_rows(&[0, 2]);

        assert_eq!(subset.features, array![[0.0], [1.0]]);
        assert_eq!(subset.maxs, vec![10.0]);
    }

    proptest! {
        #[test]
        fn scaled_columns_span_unit_interval(
            rows in prop::collection::vec(prop::collection::vec(-1e6f64..1e6, 3), 2..40)
        ) {
            let n = rows.len();
            let flat: Vec<f64> = rows.into_iter().flatten().collect();
            let features = Array2::from_shape_vec((n, 3), flat).unwrap();
            let scaled = scale_features(&features);

            for (j, column) in scaled.features.axis_iter(Axis(1)).enumerate() {
                let min = column.iter().copied().fold(f64::INFINITY, f64::min);
                let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if scaled.constant_columns.contains(&j) {
                    prop_assert!(column.iter().all(|&v| v == 0.0));
                } else {
                    prop_assert!(min.abs() < 1e-12);
                    prop_assert!((max - 1.0).abs() < 1e-12);
                }
            }
        }
    }
}
