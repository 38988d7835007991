//! Human-readable report of the segmentation run

use std::io::{self, Write};

use crate::analysis::Analysis;
use crate::data::ObservationTable;
use crate::stability::StabilityReport;
use crate::summary::{describe_columns, ClusterProfile};
use crate::sweep::{Selection, Sweep};

/// Print the full report to stdout
pub fn print_report(table: &ObservationTable, analysis: &Analysis) -> crate::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, table, analysis)?;
    out.flush()?;
    Ok(())
}

/// Write the full report to any sink
pub fn write_report<W: Write>(
    out: &mut W,
    table: &ObservationTable,
    analysis: &Analysis,
) -> crate::Result<()> {
    writeln!(out, "=== Frequent-Flyer Segmentation ===\n")?;
    writeln!(
        out,
        "{} customers, {} features (identifier column dropped)",
        table.n_rows(),
        table.n_features()
    )?;

    write_scaled_summary(out, table, analysis)?;

    for (sweep, best) in [
        (&analysis.hierarchical, &analysis.hierarchical_best),
        (&analysis.kmeans, &analysis.kmeans_best),
    ] {
        write_sweep(out, sweep)?;
        write_selection(out, table, best)?;
    }

    write_stability(out, &analysis.stability)?;
    Ok(())
}

fn write_scaled_summary<W: Write>(
    out: &mut W,
    table: &ObservationTable,
    analysis: &Analysis,
) -> io::Result<()> {
    writeln!(out, "\n=== Scaled Features (min-max) ===")?;
    writeln!(
        out,
        "{:<20} {:>8} {:>8} {:>8} {:>8}",
        "Feature", "Min", "Max", "Mean", "Std"
    )?;
    for (name, stats) in table
        .feature_names
        .iter()
        .zip(describe_columns(&analysis.scaled.features))
    {
        writeln!(
            out,
            "{:<20} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
            name, stats.min, stats.max, stats.mean, stats.std_dev
        )?;
    }

    for &j in &analysis.scaled.constant_columns {
        writeln!(
            out,
            "Note: '{}' is constant ({}) and was scaled to 0",
            table.feature_names[j], analysis.scaled.mins[j]
        )?;
    }
    Ok(())
}

fn write_sweep<W: Write>(out: &mut W, sweep: &Sweep) -> io::Result<()> {
    writeln!(out, "\n=== Silhouette Width by K: {} ===", sweep.algorithm)?;
    let with_wcss = sweep.records.iter().any(|r| r.wcss.is_some());

    if with_wcss {
        writeln!(out, "{:>4} {:>12} {:>14}", "K", "Silhouette", "Within SS")?;
    } else {
        writeln!(out, "{:>4} {:>12}", "K", "Silhouette")?;
    }

    for record in &sweep.records {
        match record.wcss {
            Some(wcss) => writeln!(
                out,
                "{:>4} {:>12.4} {:>14.3}",
                record.k, record.silhouette, wcss
            )?,
            None => writeln!(out, "{:>4} {:>12.4}", record.k, record.silhouette)?,
        }
    }
    Ok(())
}

fn write_selection<W: Write>(
    out: &mut W,
    table: &ObservationTable,
    best: &Selection,
) -> io::Result<()> {
    let total = best.partition.len().max(1) as f64;

    writeln!(
        out,
        "\nThe {} solution with the widest average silhouette has {} clusters (mean silhouette width {:.3}).",
        best.algorithm, best.k, best.silhouette
    )?;

    writeln!(out, "\nCluster sizes:")?;
    for (i, &size) in best.centroids.sizes.iter().enumerate() {
        writeln!(
            out,
            "  Cluster {}: {} customers ({:.1}%)",
            i + 1,
            size,
            size as f64 / total * 100.0
        )?;
    }

    writeln!(out, "\nCluster centroids (original units):")?;
    write!(out, "{:<20}", "Feature")?;
    for label in 1..=best.centroids.n_clusters() {
        write!(out, " {:>12}", format!("Cluster {label}"))?;
    }
    writeln!(out)?;
    for (j, name) in table.feature_names.iter().enumerate() {
        write!(out, "{:<20}", name)?;
        for row in best.centroids.means.outer_iter() {
            write!(out, " {:>12.2}", row[j])?;
        }
        writeln!(out)?;
    }

    let profile = ClusterProfile::new(&table.features, &best.centroids);
    writeln!(out, "\nSegment profiles (index vs. average customer = 100):")?;
    for label in 1..=best.centroids.n_clusters() {
        match profile.extremes(label) {
            Some((high, low)) => writeln!(
                out,
                "  Cluster {}: highest on {} ({:.0}), lowest on {} ({:.0})",
                label,
                table.feature_names[high],
                profile.indices[label - 1][high].unwrap_or_default(),
                table.feature_names[low],
                profile.indices[label - 1][low].unwrap_or_default(),
            )?,
            None => writeln!(out, "  Cluster {}: no indexable features", label)?,
        }
    }
    Ok(())
}

fn write_stability<W: Write>(out: &mut W, report: &StabilityReport) -> io::Result<()> {
    writeln!(out, "\n=== Stability Check (hierarchical) ===")?;
    writeln!(
        out,
        "Removed {} random rows, reclustered the remaining {}.",
        report.removed, report.remaining
    )?;
    writeln!(
        out,
        "Full data: K = {} (silhouette {:.3}); reduced data: K = {} (silhouette {:.3})",
        report.full_k, report.full_silhouette, report.reduced_k, report.reduced_silhouette
    )?;
    writeln!(out, "Cluster shares, largest first:")?;
    writeln!(out, "  full:    {}", format_shares(&report.full_shares))?;
    writeln!(out, "  reduced: {}", format_shares(&report.reduced_shares))?;

    if let Some(shift) = report.max_share_shift() {
        writeln!(
            out,
            "Largest change in a cluster share: {:.1} percentage points",
            shift * 100.0
        )?;
    }
    if report.is_stable() {
        writeln!(out, "The selected cluster count is stable under subsampling.")?;
    } else {
        writeln!(
            out,
            "The selected cluster count moved by more than one under subsampling."
        )?;
    }
    Ok(())
}

fn format_shares(shares: &[f64]) -> String {
    shares
        .iter()
        .map(|s| format!("{:.1}%", s * 100.0))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::config::AnalysisConfig;
    use ndarray::Array2;

    #[test]
    fn test_write_report() {
        let features = Array2::from_shape_fn((24, 2), |(i, j)| {
            let base = if i < 12 { 0.0 } else { 50.0 };
            base + ((i + j) % 3) as f64 + if j == 1 { 100.0 } else { 0.0 }
        });
        let table = ObservationTable::from_parts(
            (0..24).map(|i| format!("c{i}")).collect(),
            vec!["Balance".into(), "Days_since_enroll".into()],
            features,
        )
        .unwrap();
        let analysis = run_analysis(&table, &AnalysisConfig::with_candidates(2..=4)).unwrap();

        let mut buffer = Vec::new();
        write_report(&mut buffer, &table, &analysis).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("24 customers, 2 features"));
        assert!(text.contains("hierarchical (complete linkage)"));
        assert!(text.contains("Within SS"));
        assert!(text.contains("Days_since_enroll"));
        assert!(text.contains("Stability Check"));
    }

    #[test]
    fn test_format_shares() {
        assert_eq!(format_shares(&[0.5, 0.25, 0.25]), "50.0%, 25.0%, 25.0%");
    }
}
