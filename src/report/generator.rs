//! Markdown summary generation.
//!
//! This module renders the aggregated summary tables into one Markdown
//! document. Rendering is pure string building; the only side effect lives
//! in [`write_summary`]. Output is deterministic: identical inputs and
//! options produce byte-identical documents.

use crate::models::{ClassificationRow, Group, LocalizationRow, Summary, SummaryMetadata};
use anyhow::{Context, Result};
use std::path::Path;

/// Display options for the rendered document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Multiply values by 100 for display. Stored and averaged values stay
    /// in raw [0,1] space either way.
    pub as_percent: bool,
    /// Fixed-point decimal places.
    pub digits: usize,
    /// Threshold column labels, in render order.
    pub max_fprs: Vec<String>,
}

/// Generate the complete Markdown summary document.
pub fn generate_markdown_summary(summary: &Summary, options: &RenderOptions) -> String {
    let mut output = String::new();

    output.push_str(&generate_header_section(&summary.metadata, options));

    output.push_str("## Image-level (AUC ROC)\n\n");
    output.push_str(&generate_classification_table(
        &summary.classification,
        options,
    ));

    for group in Group::ALL {
        output.push('\n');
        output.push_str(&format!("## Localization (AU-sPRO {})\n\n", group));
        output.push_str(&render_localization_table(
            summary.localization_rows(group),
            &options.max_fprs,
            options.as_percent,
            options.digits,
        ));
    }

    output
}

/// Generate the title and metadata header.
fn generate_header_section(metadata: &SummaryMetadata, options: &RenderOptions) -> String {
    let mut section = String::new();

    section.push_str("# MVTec LOCO 评测结果汇总\n\n");
    section.push_str(&format!(
        "- metrics_dir: `{}`\n",
        metadata.metrics_dir.display()
    ));
    section.push_str(&format!("- objects: {}\n", metadata.object_count));
    section.push_str(&format!(
        "- format: {}\n",
        if options.as_percent {
            "percent(0-100)"
        } else {
            "raw(0-1)"
        }
    ));
    section.push('\n');

    section
}

/// Generate the classification (AUC-ROC) table.
fn generate_classification_table(rows: &[ClassificationRow], options: &RenderOptions) -> String {
    let mut table = String::new();

    table.push_str("| object | mean | logical_anomalies | structural_anomalies |\n");
    table.push_str("| --- | ---: | ---: | ---: |\n");

    for row in rows {
        table.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            row.object,
            fmt_value(row.mean, options.as_percent, options.digits),
            fmt_value(row.logical_anomalies, options.as_percent, options.digits),
            fmt_value(row.structural_anomalies, options.as_percent, options.digits),
        ));
    }

    table
}

/// Render one localization (AU-sPRO) table.
///
/// Takes the row collection and the column order explicitly, so the same
/// function serves all three groups.
pub fn render_localization_table(
    rows: &[LocalizationRow],
    max_fprs: &[String],
    as_percent: bool,
    digits: usize,
) -> String {
    let mut table = String::new();

    let headers: Vec<String> = std::iter::once("object".to_string())
        .chain(max_fprs.iter().map(|fpr| format!("@{}", fpr)))
        .collect();
    table.push_str(&format!("| {} |\n", headers.join(" | ")));

    let aligns: Vec<&str> = std::iter::once("---")
        .chain(max_fprs.iter().map(|_| "---:"))
        .collect();
    table.push_str(&format!("| {} |\n", aligns.join(" | ")));

    for row in rows {
        let cells: Vec<String> = std::iter::once(row.object.clone())
            .chain(
                row.values
                    .iter()
                    .map(|value| fmt_value(*value, as_percent, digits)),
            )
            .collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    table
}

/// Format one value: fixed-point, optionally scaled to percent.
pub fn fmt_value(value: f64, as_percent: bool, digits: usize) -> String {
    let scaled = if as_percent { value * 100.0 } else { value };
    format!("{:.*}", digits, scaled)
}

/// Write the summary document, creating missing parent directories and
/// overwriting any existing file.
pub fn write_summary(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write summary to {}", path.display()))
}
