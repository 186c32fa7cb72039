//! Metrics aggregation and macro-averaging.
//!
//! This module parses every discovered metrics file into typed records,
//! collects one classification row and three localization rows per object,
//! and appends the unweighted-mean `avg` row to each table.

use crate::error::SummaryError;
use crate::models::{
    ClassificationRow, Group, LocalizationRow, MetricsFile, Summary, SummaryMetadata,
};
use crate::scanner::DiscoveredMetrics;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Object identifier of the synthetic macro-average row.
pub const AVG_OBJECT: &str = "avg";

/// Aggregate all discovered metrics files into a summary.
///
/// Parsing is eager and strict: a missing required key in any file aborts
/// the whole aggregation with an error naming that file. Averages are
/// computed in raw [0,1] space over the real rows only; the `avg` row is
/// always last.
pub fn aggregate(
    metrics_dir: &Path,
    discovered: &[DiscoveredMetrics],
    max_fprs: &[String],
) -> Result<Summary, SummaryError> {
    if max_fprs.is_empty() {
        return Err(SummaryError::EmptyThresholds);
    }

    let mut classification: Vec<ClassificationRow> = Vec::with_capacity(discovered.len());
    let mut localization: HashMap<Group, Vec<LocalizationRow>> = HashMap::new();

    for item in discovered {
        debug!("Aggregating {}", item.path.display());
        let metrics = load_metrics(&item.path)?;

        let auc_roc = &metrics.classification.auc_roc;
        classification.push(ClassificationRow {
            object: item.object.clone(),
            mean: auc_roc.mean,
            logical_anomalies: auc_roc.logical_anomalies,
            structural_anomalies: auc_roc.structural_anomalies,
        });

        for group in Group::ALL {
            let thresholds = metrics
                .localization
                .auc_spro
                .get(group.key())
                .ok_or_else(|| SummaryError::MissingGroup {
                    group: group.key(),
                    path: item.path.clone(),
                })?;

            let mut values = Vec::with_capacity(max_fprs.len());
            for fpr in max_fprs {
                let value =
                    thresholds
                        .get(fpr)
                        .copied()
                        .ok_or_else(|| SummaryError::MissingThreshold {
                            group: group.key(),
                            threshold: fpr.clone(),
                            path: item.path.clone(),
                        })?;
                values.push(value);
            }

            localization.entry(group).or_default().push(LocalizationRow {
                object: item.object.clone(),
                values,
            });
        }
    }

    classification.sort_by(|a, b| a.object.cmp(&b.object));
    append_classification_avg(&mut classification);

    for rows in localization.values_mut() {
        rows.sort_by(|a, b| a.object.cmp(&b.object));
        append_localization_avg(rows, max_fprs.len());
    }

    Ok(Summary {
        metadata: SummaryMetadata {
            metrics_dir: metrics_dir.to_path_buf(),
            object_count: discovered.len(),
        },
        classification,
        localization,
    })
}

/// Read and parse a single metrics file.
fn load_metrics(path: &Path) -> Result<MetricsFile, SummaryError> {
    let content = fs::read_to_string(path).map_err(|source| SummaryError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| SummaryError::InvalidMetrics {
        path: path.to_path_buf(),
        source,
    })
}

/// Append the `avg` row to a classification table.
pub fn append_classification_avg(rows: &mut Vec<ClassificationRow>) {
    if rows.is_empty() {
        return;
    }

    rows.push(ClassificationRow {
        object: AVG_OBJECT.to_string(),
        mean: column_mean(rows.iter().map(|r| r.mean)),
        logical_anomalies: column_mean(rows.iter().map(|r| r.logical_anomalies)),
        structural_anomalies: column_mean(rows.iter().map(|r| r.structural_anomalies)),
    });
}

/// Append the `avg` row to a localization table with `width` columns.
pub fn append_localization_avg(rows: &mut Vec<LocalizationRow>, width: usize) {
    if rows.is_empty() {
        return;
    }

    let values = (0..width)
        .map(|i| column_mean(rows.iter().map(|r| r.values[i])))
        .collect();

    rows.push(LocalizationRow {
        object: AVG_OBJECT.to_string(),
        values,
    });
}

/// Unweighted arithmetic mean. Callers guarantee a non-empty iterator.
fn column_mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    sum / count as f64
}
