//! Data models for the metrics summarizer.
//!
//! This module contains the typed view of a `metrics.json` input file and
//! the derived row/table structures that the aggregator builds and the
//! report generator renders.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// One of the three fixed result partitions of an MVTec LOCO evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Overall mean across both anomaly kinds.
    Mean,
    /// Logical-anomaly subset.
    LogicalAnomalies,
    /// Structural-anomaly subset.
    StructuralAnomalies,
}

impl Group {
    /// All groups, in the order they appear in the report.
    pub const ALL: [Group; 3] = [
        Group::Mean,
        Group::LogicalAnomalies,
        Group::StructuralAnomalies,
    ];

    /// The JSON key this group uses under `localization.auc_spro`.
    pub fn key(&self) -> &'static str {
        match self {
            Group::Mean => "mean",
            Group::LogicalAnomalies => "logical_anomalies",
            Group::StructuralAnomalies => "structural_anomalies",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Root of a parsed `metrics.json` file.
///
/// All fields are required; serde turns an absent key into a parse error,
/// which the aggregator wraps with the offending file path. Extra keys in
/// the input are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsFile {
    /// Image-level classification scores.
    pub classification: Classification,
    /// Pixel/region-level localization scores.
    pub localization: Localization,
}

/// Image-level classification section.
#[derive(Debug, Clone, Deserialize)]
pub struct Classification {
    pub auc_roc: AucRoc,
}

/// AUC-ROC scores per group, each in [0,1].
#[derive(Debug, Clone, Deserialize)]
pub struct AucRoc {
    pub mean: f64,
    pub logical_anomalies: f64,
    pub structural_anomalies: f64,
}

/// Localization section. Group and threshold keys stay dynamic here; the
/// aggregator checks the fixed groups and requested thresholds eagerly and
/// reports absences as typed errors.
#[derive(Debug, Clone, Deserialize)]
pub struct Localization {
    pub auc_spro: HashMap<String, HashMap<String, f64>>,
}

/// One classification table row for a single object.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRow {
    pub object: String,
    pub mean: f64,
    pub logical_anomalies: f64,
    pub structural_anomalies: f64,
}

/// One localization table row for a single object.
///
/// `values` is aligned with the requested threshold order, so the renderer
/// never needs to look thresholds up again.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizationRow {
    pub object: String,
    pub values: Vec<f64>,
}

/// Metadata rendered in the report header.
#[derive(Debug, Clone)]
pub struct SummaryMetadata {
    /// Directory the metrics were discovered under.
    pub metrics_dir: PathBuf,
    /// Number of real objects (excludes the synthetic `avg` row).
    pub object_count: usize,
}

/// The complete aggregated summary: one classification table and one
/// localization table per group, each sorted by object with a trailing
/// `avg` row.
#[derive(Debug, Clone)]
pub struct Summary {
    pub metadata: SummaryMetadata,
    pub classification: Vec<ClassificationRow>,
    pub localization: HashMap<Group, Vec<LocalizationRow>>,
}

impl Summary {
    /// Rows for one localization group, in report order.
    pub fn localization_rows(&self, group: Group) -> &[LocalizationRow] {
        self.localization
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
