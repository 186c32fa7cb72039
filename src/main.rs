//! loco-summary - MVTec LOCO metrics summarizer
//!
//! A CLI tool that collects per-object anomaly-detection evaluation
//! results (metrics.json files with AUC-ROC and AU-sPRO scores) into one
//! Markdown summary table with macro-averages across objects.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (missing directory, missing key, write failure, etc.)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use error::SummaryError;
use report::RenderOptions;
use scanner::MetricsScanner;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("loco-summary v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the pipeline
    if let Err(e) = run_summary(args) {
        error!("Summary failed: {}", e);
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .locosummary.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".locosummary.toml");

    if path.exists() {
        eprintln!(".locosummary.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .locosummary.toml")?;

    println!("Created .locosummary.toml with default settings.");
    println!("Edit it to customize the metrics directory, digits, and thresholds.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete scan, aggregate, and render pipeline.
fn run_summary(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let max_fprs = config.summary.effective_max_fprs();
    if max_fprs.is_empty() {
        return Err(SummaryError::EmptyThresholds.into());
    }

    let metrics_dir = config.summary.metrics_dir.clone();
    let output_md = config.summary.output_path();

    // Step 1: Discover per-object metrics files
    let scanner = MetricsScanner::new(metrics_dir.clone());
    let discovered = scanner.scan()?;
    info!(
        "Found {} metrics files under {}",
        discovered.len(),
        metrics_dir.display()
    );

    // Step 2: Aggregate rows and macro-averages
    let summary = analysis::aggregate(&metrics_dir, &discovered, &max_fprs)?;

    // Step 3: Render and write the Markdown summary
    let options = RenderOptions {
        as_percent: !config.summary.raw,
        digits: config.summary.digits,
        max_fprs,
    };
    let markdown = report::generate_markdown_summary(&summary, &options);

    report::write_summary(&output_md, &markdown)?;
    println!("Wrote: {}", output_md.display());

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .locosummary.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
