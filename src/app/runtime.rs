//! Runtime entry point
//!
//! Resolves configuration, runs the dispatcher and writes the report.

use crate::app::config::AppConfig;
use crate::config::{resolve_config, ConfigOverrides};
use crate::dispatch::Dispatcher;
use crate::output::render;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Run one analysis and write the rendered report to `out`
pub async fn run<W: Write>(
    app: &AppConfig,
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    out: &mut W,
) -> Result<()> {
    let config = resolve_config(config_path, overrides)
        .await
        .context("Failed to resolve configuration")?;

    info!("Analyzing reports in {}", config.source_dir.display());
    let source_dir = config.source_dir.clone();

    let outcome = Dispatcher::new(config)
        .run()
        .await
        .with_context(|| format!("Failed to analyze {}", source_dir.display()))?;

    if !outcome.failures.is_empty() {
        warn!(
            "{} of {} files could not be processed",
            outcome.failures.len(),
            outcome.dispatched
        );
    }

    let report = render(&outcome, app.format).context("Failed to render report")?;
    out.write_all(report.as_bytes())
        .context("Failed to write report")?;
    if !report.ends_with('\n') {
        writeln!(out).context("Failed to write report")?;
    }
    out.flush().context("Failed to write report")?;

    Ok(())
}
