//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.locosummary.toml` files. The config file holds the pipeline defaults;
//! CLI arguments take precedence over it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The default AU-sPRO threshold columns.
pub const DEFAULT_MAX_FPRS: [&str; 5] = ["0.01", "0.05", "0.1", "0.3", "1.0"];

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Summary pipeline settings.
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Summary pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Directory containing per-object subdirs with metrics.json.
    #[serde(default = "default_metrics_dir")]
    pub metrics_dir: PathBuf,

    /// Output markdown path. None means `<metrics_dir>/summary.md`.
    #[serde(default)]
    pub output_md: Option<PathBuf>,

    /// Emit raw [0,1] values instead of percent.
    #[serde(default)]
    pub raw: bool,

    /// Number of decimal digits to keep.
    #[serde(default = "default_digits")]
    pub digits: usize,

    /// AU-sPRO threshold columns, in render order.
    #[serde(default = "default_max_fprs")]
    pub max_fprs: Vec<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            metrics_dir: default_metrics_dir(),
            output_md: None,
            raw: false,
            digits: default_digits(),
            max_fprs: default_max_fprs(),
        }
    }
}

fn default_metrics_dir() -> PathBuf {
    PathBuf::from("output/1/metrics/mvtec_loco")
}

fn default_digits() -> usize {
    2
}

fn default_max_fprs() -> Vec<String> {
    DEFAULT_MAX_FPRS.into_iter().map(String::from).collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".locosummary.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref metrics_dir) = args.metrics_dir {
            self.summary.metrics_dir = metrics_dir.clone();
        }
        if let Some(ref output_md) = args.output_md {
            self.summary.output_md = Some(output_md.clone());
        }
        if let Some(digits) = args.digits {
            self.summary.digits = digits;
        }
        if let Some(ref max_fprs) = args.max_fprs {
            self.summary.max_fprs = max_fprs.clone();
        }

        // Flags always override
        if args.raw {
            self.summary.raw = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

impl SummaryConfig {
    /// Threshold labels after trimming, with empty entries dropped.
    pub fn effective_max_fprs(&self) -> Vec<String> {
        self.max_fprs
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// The effective output path: explicit `output_md` or
    /// `<metrics_dir>/summary.md`.
    pub fn output_path(&self) -> PathBuf {
        self.output_md
            .clone()
            .unwrap_or_else(|| self.metrics_dir.join("summary.md"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.summary.metrics_dir,
            PathBuf::from("output/1/metrics/mvtec_loco")
        );
        assert_eq!(config.summary.digits, 2);
        assert_eq!(config.summary.max_fprs.len(), 5);
        assert!(!config.summary.raw);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[summary]
metrics_dir = "runs/7/metrics"
raw = true
digits = 4
max_fprs = ["0.05", "0.3"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.summary.metrics_dir, PathBuf::from("runs/7/metrics"));
        assert!(config.summary.raw);
        assert_eq!(config.summary.digits, 4);
        assert_eq!(config.summary.max_fprs, vec!["0.05", "0.3"]);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[summary]"));
        assert!(toml_str.contains("max_fprs"));
    }

    #[test]
    fn test_effective_max_fprs_trims_and_drops_empties() {
        let mut summary = SummaryConfig::default();
        summary.max_fprs = vec![
            " 0.01 ".to_string(),
            "".to_string(),
            "0.1".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(summary.effective_max_fprs(), vec!["0.01", "0.1"]);
    }

    #[test]
    fn test_output_path_defaults_under_metrics_dir() {
        let summary = SummaryConfig::default();
        assert_eq!(
            summary.output_path(),
            PathBuf::from("output/1/metrics/mvtec_loco/summary.md")
        );

        let mut explicit = SummaryConfig::default();
        explicit.output_md = Some(PathBuf::from("report.md"));
        assert_eq!(explicit.output_path(), PathBuf::from("report.md"));
    }
}
