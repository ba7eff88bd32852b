//! Per-file work: read, decode, compute duration, hand off to the aggregator

use crate::abstractions::ReportReader;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::{compute_duration, decode};
use crate::stats::{AggregatorHandle, FileFailure, MergeRequest};
use std::path::Path;
use tracing::{debug, warn};

/// Turn one file into a merge request
pub async fn analyze_file(
    path: &Path,
    config: &AnalysisConfig,
    reader: &dyn ReportReader,
) -> Result<MergeRequest> {
    let bytes = reader.read(path).await?;
    let record = decode(&bytes)?;

    let finished_bug = record.issue_type == config.bug_category && config.is_terminal(&record.status);
    let duration_secs = match (finished_bug, record.resolved.as_deref()) {
        (true, Some(resolved)) => Some(compute_duration(&record.created, resolved)?),
        (true, None) => {
            warn!(
                "{} is {} but has no resolution date; no duration recorded",
                path.display(),
                record.status
            );
            None
        }
        (false, _) => None,
    };

    Ok(MergeRequest {
        path: path.to_path_buf(),
        record,
        duration_secs,
    })
}

/// Process one file and send exactly one message to the aggregator.
///
/// Read, decode and timestamp errors become a failure message; anything
/// else, such as a closed aggregator, is returned as an error.
pub async fn process_file(
    path: &Path,
    config: &AnalysisConfig,
    reader: &dyn ReportReader,
    aggregator: &AggregatorHandle,
) -> Result<()> {
    debug!("Opening {}", path.display());

    match analyze_file(path, config, reader).await {
        Ok(request) => aggregator.merge(request).await,
        Err(e) => match FileFailure::from_error(path, &e) {
            Some(failure) => {
                warn!("Skipping {}: {}", path.display(), e);
                aggregator.fail(failure).await
            }
            None => Err(e),
        },
    }
}
