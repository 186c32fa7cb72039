//! Error taxonomy for the summary pipeline.
//!
//! Every variant carries enough context (path, group, threshold) to
//! diagnose the failure without a stack trace. All errors are terminal:
//! the pipeline never writes partial output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by discovery, aggregation, and option validation.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The metrics directory does not exist or is not a directory.
    #[error("metrics_dir not found: {}", .0.display())]
    MetricsDirNotFound(PathBuf),

    /// No `<object>/metrics.json` files were found under the directory.
    #[error("no metrics.json found under: {}", .0.display())]
    NoMetricsFound(PathBuf),

    /// The effective threshold list is empty after trimming.
    #[error("max_fprs is empty")]
    EmptyThresholds,

    /// A metrics file could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A metrics file is not valid JSON or is missing a required field.
    #[error("invalid metrics in {}: {}", .path.display(), .source)]
    InvalidMetrics {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A fixed localization group is absent from `auc_spro`.
    #[error("missing auc_spro[{group}] in {}", .path.display())]
    MissingGroup { group: &'static str, path: PathBuf },

    /// A requested FPR threshold is absent from a group.
    #[error("missing auc_spro.{group}[{threshold}] in {}", .path.display())]
    MissingThreshold {
        group: &'static str,
        threshold: String,
        path: PathBuf,
    },
}
