//! Result rendering for the command line.
//!
//! Structured modes serialize the command's data directly. Text mode renders
//! a short styled summary.

use colorswitch::{ColorMapping, FileStatus, PublishOutcome, StylesheetRecord, SwitchReport};
use console::style;
use serde::Serialize;
use thiserror::Error;

use crate::cli::OutputMode;

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Not a structured output mode")]
    NotStructured,
}

/// Serializes data to the specified structured format.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Text => Err(SerializeError::NotStructured),
    }
}

/// Result of the `check` command.
#[derive(Debug, Serialize)]
pub struct CheckSummary<'a> {
    pub config_file: &'a str,
    pub theme: &'a str,
    pub switch_colors: bool,
    pub mapping: &'a ColorMapping,
}

pub fn render_report(report: &SwitchReport) -> String {
    let mut out = String::new();
    for file in &report.files {
        let line = match &file.status {
            FileStatus::Unchanged => format!("  {} {}", style("=").dim(), file.name),
            FileStatus::Modified { replacements } => format!(
                "  {} {} ({} replaced)",
                style("~").green(),
                file.name,
                replacements
            ),
            FileStatus::Failed { error } => {
                format!("  {} {}: {}", style("!").red(), file.name, error)
            }
        };
        out.push_str(&line);
        out.push('\n');
    }

    let summary = match &report.outcome {
        PublishOutcome::Published {
            target_dir, copied, ..
        } => format!(
            "{} {} file(s) published into {}",
            style("Switch css :").green().bold(),
            copied.len(),
            target_dir.display()
        ),
        PublishOutcome::NothingModified { target_dir } => format!(
            "{} nothing modified, {} left as is",
            style("Switch css :").yellow(),
            target_dir.display()
        ),
        PublishOutcome::NoStylesheets => {
            format!("{} no css file found", style("Switch css :").yellow())
        }
    };
    out.push_str(&summary);
    out
}

pub fn render_stylesheets(records: &[StylesheetRecord]) -> String {
    if records.is_empty() {
        return style("no css file found").yellow().to_string();
    }
    records
        .iter()
        .map(|record| {
            format!(
                "{}  {}",
                style(&record.name).bold(),
                style(record.source_path.display()).dim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_check(summary: &CheckSummary<'_>) -> String {
    let mut out = format!(
        "{} {} (theme {}, switch_colors {})\n",
        style("config").bold(),
        summary.config_file,
        summary.theme,
        summary.switch_colors
    );
    if summary.mapping.is_empty() {
        out.push_str(&style("  empty colour mapping").yellow().to_string());
        return out;
    }
    let pairs: Vec<String> = summary
        .mapping
        .pairs()
        .map(|(from, to)| format!("  {} -> {}", from, style(to).cyan()))
        .collect();
    out.push_str(&pairs.join("\n"));
    out
}
