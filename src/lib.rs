//! flyer-segments: customer segmentation of airline frequent-flyer data
//!
//! Loads a table of behavioural features, min-max scales it, and compares
//! complete-linkage hierarchical clustering with k-means over a range of
//! cluster counts, picking the count with the best mean silhouette width.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod distance;
pub mod hierarchical;
pub mod model;
pub mod partition;
pub mod report;
pub mod scale;
pub mod silhouette;
pub mod stability;
pub mod summary;
pub mod sweep;

// Re-export public items for easier access
pub use analysis::{run_analysis, Analysis};
pub use cli::Args;
pub use config::AnalysisConfig;
pub use data::{load_observations, ObservationTable};
pub use distance::DistanceMatrix;
pub use partition::Partition;
pub use scale::{scale_features, ScaledTable};
pub use sweep::{select, sweep_hierarchical, sweep_kmeans, Selection, Sweep, SweepRecord};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
