//! Rendering of finished analysis results
//!
//! Text output follows the line layout operators already grep for; JSON
//! carries the same data in a [`ReportSummary`].

pub mod formatting;

pub use formatting::{format_duration, format_optional_duration};

use crate::dispatch::AnalysisOutcome;
use crate::error::Result;
use crate::stats::{FileFailure, Statistics};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

/// Bug duration statistics in seconds
#[derive(Debug, Clone, Serialize)]
pub struct DurationReport {
    pub count: usize,
    pub min_secs: f64,
    pub max_secs: f64,
    pub median_secs: Option<f64>,
    pub average_secs: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_records: usize,
    pub dispatched: usize,
    pub bug_durations: Option<DurationReport>,
    pub categories: Vec<NamedCount>,
    pub bug_statuses: Vec<NamedCount>,
    pub failed: usize,
    pub failures: Vec<FileFailure>,
    pub abandoned: Vec<PathBuf>,
    pub elapsed_ms: u128,
}

impl ReportSummary {
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        let stats = &outcome.statistics;
        Self {
            total_records: stats.total_records(),
            dispatched: outcome.dispatched,
            bug_durations: duration_report(stats),
            categories: stats
                .known_types()
                .iter()
                .map(|name| NamedCount {
                    name: name.clone(),
                    count: stats.category_total(name),
                })
                .collect(),
            bug_statuses: stats
                .known_statuses()
                .iter()
                .map(|name| NamedCount {
                    name: name.clone(),
                    count: stats.bug_status_total(name),
                })
                .collect(),
            failed: outcome.failures.len(),
            failures: outcome.failures.failures().to_vec(),
            abandoned: outcome.abandoned.clone(),
            elapsed_ms: outcome.elapsed.as_millis(),
        }
    }
}

fn duration_report(stats: &Statistics) -> Option<DurationReport> {
    stats.summary().map(|summary| DurationReport {
        count: summary.count,
        min_secs: summary.min,
        max_secs: summary.max,
        median_secs: stats.bug_median(),
        average_secs: summary.average,
    })
}

/// One metric or category per line
pub fn render_text(outcome: &AnalysisOutcome) -> String {
    let stats = &outcome.statistics;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Bug Min Time: {}", format_optional_duration(stats.bug_min()));
    let _ = writeln!(out, "Bug Max Time: {}", format_optional_duration(stats.bug_max()));
    let _ = writeln!(
        out,
        "Bug Median Time: {}",
        format_optional_duration(stats.bug_median())
    );
    let _ = writeln!(
        out,
        "Bug Average Time: {}",
        format_optional_duration(stats.bug_average())
    );
    let _ = writeln!(out, "Total Number of Reports: {}", stats.total_records());

    for issue_type in stats.known_types() {
        let _ = writeln!(
            out,
            "Total Number of {} : {}",
            issue_type,
            stats.category_total(issue_type)
        );
    }
    for status in stats.known_statuses() {
        let _ = writeln!(
            out,
            "Total Number of Bugs With Status {} : {}",
            status,
            stats.bug_status_total(status)
        );
    }

    let _ = writeln!(out, "Failed Files: {}", outcome.failures.len());
    if !outcome.abandoned.is_empty() {
        let _ = writeln!(out, "Abandoned Files: {}", outcome.abandoned.len());
    }

    out
}

pub fn render_json(outcome: &AnalysisOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ReportSummary::from_outcome(
        outcome,
    ))?)
}

pub fn render(outcome: &AnalysisOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(outcome)),
        OutputFormat::Json => render_json(outcome),
    }
}
