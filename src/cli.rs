//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// loco-summary - MVTec LOCO metrics summarizer
///
/// Collect per-object metrics.json evaluation results (AUC-ROC and
/// AU-sPRO) into one Markdown summary with macro-averages.
///
/// Examples:
///   loco-summary
///   loco-summary --metrics_dir output/3/metrics/mvtec_loco
///   loco-summary --raw --digits 4
///   loco-summary --max_fprs 0.01,0.1 --output_md report.md
///   loco-summary --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing per-object subdirs with metrics.json
    ///
    /// Default: from config or `output/1/metrics/mvtec_loco`.
    #[arg(long = "metrics_dir", value_name = "DIR", env = "LOCO_METRICS_DIR")]
    pub metrics_dir: Option<PathBuf>,

    /// Output markdown path
    ///
    /// Default: `<metrics_dir>/summary.md`.
    #[arg(long = "output_md", value_name = "FILE")]
    pub output_md: Option<PathBuf>,

    /// Output raw values in [0,1] instead of percent
    #[arg(long)]
    pub raw: bool,

    /// Number of decimal digits to keep
    ///
    /// Default: from config or 2.
    #[arg(long, value_name = "N")]
    pub digits: Option<usize>,

    /// Comma-separated max FPRs for AU-sPRO columns
    ///
    /// Column order follows this list. Default: from config or
    /// `0.01,0.05,0.1,0.3,1.0`.
    #[arg(long = "max_fprs", value_name = "FPRS", value_delimiter = ',')]
    pub max_fprs: Option<Vec<String>>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .locosummary.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .locosummary.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // An explicitly given threshold list must survive trimming
        if let Some(ref fprs) = self.max_fprs {
            if fprs.iter().all(|s| s.trim().is_empty()) {
                return Err("--max_fprs is empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
