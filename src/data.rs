//! Observation table loading using Polars

use std::path::Path;

use anyhow::Context;
use ndarray::Array2;
use polars::prelude::*;
use tracing::debug;

/// Customer feature table with the identifier column split off
#[derive(Debug, Clone)]
pub struct ObservationTable {
    /// Identifier of each row, kept only for display
    pub ids: Vec<String>,
    /// Names of the feature columns, in column order
    pub feature_names: Vec<String>,
    /// Raw feature values (n_customers, n_features)
    pub features: Array2<f64>,
}

impl ObservationTable {
    /// Build a table from in-memory parts, validating the shapes agree
    pub fn from_parts(
        ids: Vec<String>,
        feature_names: Vec<String>,
        features: Array2<f64>,
    ) -> crate::Result<Self> {
        if ids.len() != features.nrows() {
            anyhow::bail!(
                "{} identifiers given for {} rows",
                ids.len(),
                features.nrows()
            );
        }
        if feature_names.len() != features.ncols() {
            anyhow::bail!(
                "{} feature names given for {} columns",
                feature_names.len(),
                features.ncols()
            );
        }
        if features.is_empty() {
            anyhow::bail!("Observation table has no data");
        }
        if features.iter().any(|v| !v.is_finite()) {
            anyhow::bail!("Observation table contains non-finite values");
        }

        Ok(Self {
            ids,
            feature_names,
            features,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Load a headered CSV file and drop its leading identifier column
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// * `ObservationTable` with every remaining column cast to `f64`
pub fn load_observations(path: impl AsRef<Path>) -> crate::Result<ObservationTable> {
    let path = path.as_ref();
    if !path.is_file() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .with_context(|| format!("Failed to read CSV file {}", path.display()))?;

    debug!(rows = df.height(), columns = df.width(), "CSV loaded");
    table_from_frame(&df)
}

/// Convert a DataFrame whose first column is the identifier
fn table_from_frame(df: &DataFrame) -> crate::Result<ObservationTable> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let Some((id_name, feature_names)) = names.split_first() else {
        anyhow::bail!("Input has no columns");
    };
    if feature_names.is_empty() {
        anyhow::bail!("Input needs at least one feature column after '{id_name}'");
    }
    if df.height() == 0 {
        anyhow::bail!("Input has no rows");
    }

    let ids: Vec<String> = df
        .column(id_name)?
        .cast(&DataType::String)?
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, id)| id.map(str::to_string).unwrap_or_else(|| format!("row-{}", row + 1)))
        .collect();

    let n_rows = df.height();
    let n_cols = feature_names.len();
    let mut features = Array2::<f64>::zeros((n_rows, n_cols));

    for (j, name) in feature_names.iter().enumerate() {
        let series = df
            .column(name)?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{name}' is not numeric"))?;

        for (i, value) in series.f64()?.into_iter().enumerate() {
            let value = value.with_context(|| {
                format!("Missing or non-numeric value in column '{name}' at row {}", i + 1)
            })?;
            features[[i, j]] = value;
        }
    }

    ObservationTable::from_parts(ids, feature_names.to_vec(), features)
}
