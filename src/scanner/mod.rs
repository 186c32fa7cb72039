//! Discovery of per-object metrics files.
//!
//! The metrics directory holds one subdirectory per evaluated object, each
//! containing a `metrics.json`. The scanner enumerates exactly that layout
//! and derives the object identifier from the containing directory name.

use crate::error::SummaryError;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

/// A discovered `<object>/metrics.json` file.
#[derive(Debug, Clone)]
pub struct DiscoveredMetrics {
    /// Object identifier (the containing directory name).
    pub object: String,
    /// Absolute or relative path to the metrics.json file.
    pub path: PathBuf,
}

/// Scanner for `<metrics_dir>/<object>/metrics.json` files.
pub struct MetricsScanner {
    metrics_dir: PathBuf,
}

impl MetricsScanner {
    /// Create a new scanner rooted at the metrics directory.
    pub fn new(metrics_dir: PathBuf) -> Self {
        Self { metrics_dir }
    }

    /// Scan for all metrics files, sorted lexicographically by object name.
    ///
    /// Fails when the directory does not exist or nothing matches. Only
    /// files exactly one level below the root are considered; anything
    /// deeper or directly in the root is ignored.
    pub fn scan(&self) -> Result<Vec<DiscoveredMetrics>, SummaryError> {
        if !self.metrics_dir.is_dir() {
            return Err(SummaryError::MetricsDirNotFound(self.metrics_dir.clone()));
        }

        let mut found = Vec::new();

        for entry in WalkDir::new(&self.metrics_dir)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() || entry.file_name() != "metrics.json" {
                continue;
            }

            let object = match entry.path().parent().and_then(|p| p.file_name()) {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };

            debug!("Found metrics for {}: {}", object, entry.path().display());
            found.push(DiscoveredMetrics {
                object,
                path: entry.path().to_path_buf(),
            });
        }

        if found.is_empty() {
            return Err(SummaryError::NoMetricsFound(self.metrics_dir.clone()));
        }

        found.sort_by(|a, b| a.object.cmp(&b.object));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_metrics(root: &std::path::Path, object: &str) {
        let dir = root.join(object);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("metrics.json"), "{}").unwrap();
    }

    #[test]
    fn test_scan_sorts_by_object_name() {
        let tmp = TempDir::new().unwrap();
        write_metrics(tmp.path(), "screw_bag");
        write_metrics(tmp.path(), "breakfast_box");
        write_metrics(tmp.path(), "juice_bottle");

        let scanner = MetricsScanner::new(tmp.path().to_path_buf());
        let found = scanner.scan().unwrap();

        let objects: Vec<_> = found.iter().map(|d| d.object.as_str()).collect();
        assert_eq!(objects, vec!["breakfast_box", "juice_bottle", "screw_bag"]);
    }

    #[test]
    fn test_scan_ignores_other_files_and_depths() {
        let tmp = TempDir::new().unwrap();
        write_metrics(tmp.path(), "pushpins");

        // A metrics.json directly in the root must not match
        fs::write(tmp.path().join("metrics.json"), "{}").unwrap();
        // Nor one nested two levels down
        let deep = tmp.path().join("pushpins").join("nested");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("metrics.json"), "{}").unwrap();
        // Nor other files beside a valid one
        fs::write(tmp.path().join("pushpins").join("notes.txt"), "x").unwrap();

        let scanner = MetricsScanner::new(tmp.path().to_path_buf());
        let found = scanner.scan().unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].object, "pushpins");
    }

    #[test]
    fn test_scan_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");

        let scanner = MetricsScanner::new(missing.clone());
        let err = scanner.scan().unwrap_err();

        assert!(matches!(err, SummaryError::MetricsDirNotFound(_)));
        assert!(err.to_string().contains("does-not-exist"));
    }

    #[test]
    fn test_scan_empty_directory() {
        let tmp = TempDir::new().unwrap();

        let scanner = MetricsScanner::new(tmp.path().to_path_buf());
        let err = scanner.scan().unwrap_err();

        assert!(matches!(err, SummaryError::NoMetricsFound(_)));
    }
}
