//! Integration tests for flyer-segments

use flyer_segments::{
    load_observations, run_analysis, scale_features, select, sweep_hierarchical, sweep_kmeans,
    AnalysisConfig, DistanceMatrix,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// 20 customers in three far-apart groups of 7, 7 and 6, plus an ID column
fn create_three_group_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ID#,Balance,Bonus_miles,Flight_trans_12").unwrap();

    let centres = [(1000.0, 200.0, 1.0), (50000.0, 30000.0, 10.0), (90000.0, 500.0, 25.0)];
    let sizes = [7, 7, 6];
    let mut id = 1;
    for (group, &(balance, bonus, flights)) in centres.iter().enumerate() {
        for member in 0..sizes[group] {
            let wiggle = member as f64;
            writeln!(
                file,
                "{},{},{},{}",
                id,
                balance + wiggle * 150.0,
                bonus + wiggle * 40.0,
                flights + (member % 2) as f64
            )
            .unwrap();
            id += 1;
        }
    }
    file
}

fn group_of(row: usize) -> usize {
    match row {
        0..=6 => 0,
        7..=13 => 1,
        _ => 2,
    }
}

#[test]
fn test_end_to_end_selects_three_groups() {
    let test_file = create_three_group_csv();
    let table = load_observations(test_file.path()).unwrap();
    assert_eq!(table.features.shape(), &[20, 3]);

    let config = AnalysisConfig::with_candidates(2..=5);
    let analysis = run_analysis(&table, &config).unwrap();

    for best in [&analysis.hierarchical_best, &analysis.kmeans_best] {
        assert_eq!(best.k, 3, "{} picked {}", best.algorithm, best.k);
        assert!(best.silhouette > 0.7, "silhouette {}", best.silhouette);

        let labels = best.partition.labels();
        for i in 0..20 {
            for j in 0..20 {
                assert_eq!(
                    group_of(i) == group_of(j),
                    labels[i] == labels[j],
                    "rows {i} and {j}"
                );
            }
        }
        assert_eq!(best.centroids.sizes.iter().sum::<usize>(), 20);
    }
}

#[test]
fn test_partitions_use_contiguous_labels() {
    let test_file = create_three_group_csv();
    let table = load_observations(test_file.path()).unwrap();
    let analysis = run_analysis(&table, &AnalysisConfig::with_candidates(2..=5)).unwrap();

    for record in analysis
        .hierarchical
        .records
        .iter()
        .chain(analysis.kmeans.records.iter())
    {
        let partition = &record.partition;
        assert_eq!(partition.len(), 20);
        assert_eq!(partition.k(), record.k);
        let mut seen: Vec<usize> = partition.labels().to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, (1..=record.k).collect::<Vec<_>>());
        assert!((-1.0..=1.0).contains(&record.silhouette));
    }
}

#[test]
fn test_same_seed_is_deterministic() {
    let test_file = create_three_group_csv();
    let table = load_observations(test_file.path()).unwrap();
    let config = AnalysisConfig::with_candidates(2..=5);

    let first = run_analysis(&table, &config).unwrap();
    let second = run_analysis(&table, &config).unwrap();

    assert_eq!(first.kmeans_best.k, second.kmeans_best.k);
    assert_eq!(first.kmeans_best.partition, second.kmeans_best.partition);
    assert_eq!(first.kmeans_best.centroids, second.kmeans_best.centroids);
    assert_eq!(first.hierarchical_best.partition, second.hierarchical_best.partition);
    assert_eq!(first.hierarchical_best.centroids, second.hierarchical_best.centroids);
    assert_eq!(first.stability, second.stability);
}

#[test]
fn test_constant_column_stays_well_defined() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ID#,Balance,cc2_miles,Bonus_trans").unwrap();
    for i in 0..12 {
        let group = (i / 4) as f64;
        writeln!(file, "{},{},1,{}", i + 1, group * 1000.0 + i as f64, group * 10.0).unwrap();
    }

    let table = load_observations(file.path()).unwrap();
    let scaled = scale_features(&table.features);
    assert_eq!(scaled.constant_columns, vec![1]);
    assert!(scaled.features.iter().all(|v| v.is_finite()));

    let distances = DistanceMatrix::euclidean(&scaled.features);
    assert!(distances.condensed().iter().all(|d| d.is_finite() && *d >= 0.0));

    let candidates = [2, 3, 4];
    let sweep = sweep_hierarchical(&distances, &candidates).unwrap();
    let hierarchical = select(&sweep, &table.features).unwrap();
    assert_eq!(hierarchical.k, 3);

    let kmeans = sweep_kmeans(
        &scaled.features,
        &distances,
        &candidates,
        &AnalysisConfig::default().kmeans,
    )
    .unwrap();
    assert!(kmeans.records.iter().all(|r| r.silhouette.is_finite()));
}

#[test]
fn test_stability_on_strong_structure() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ID#,Balance,Bonus_miles").unwrap();
    let centres = [(0.0, 0.0), (500.0, 900.0), (1000.0, 100.0)];
    for i in 0..120 {
        let (x, y) = centres[i / 40];
        let jitter = (i % 6) as f64 * 4.0;
        writeln!(file, "{},{},{}", i + 1, x + jitter, y + jitter * 0.5).unwrap();
    }

    let table = load_observations(file.path()).unwrap();
    let analysis = run_analysis(&table, &AnalysisConfig::with_candidates(2..=6)).unwrap();
    let stability = &analysis.stability;

    assert_eq!(stability.removed, 6);
    assert_eq!(stability.remaining, 114);
    assert_eq!(stability.full_k, 3);
    assert!(stability.is_stable());
    assert!(stability.reduced_k.abs_diff(stability.full_k) <= 1);
}

#[test]
fn test_missing_input_is_fatal() {
    let result = load_observations("no_such_customers.csv");
    assert!(result.is_err());
}
