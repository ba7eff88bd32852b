//! Concurrent dispatch of report files
//!
//! One task per file, bounded by a semaphore. Every task sends exactly one
//! message to the aggregator. The run is complete only after every task has
//! been joined (or abandoned at the deadline) and the aggregator has drained
//! its channel; statistics are finalized after that point.

pub mod discovery;
pub mod worker;

pub use discovery::discover_files;
pub use worker::{analyze_file, process_file};

use crate::abstractions::{FsReportReader, ReportReader};
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::stats::{Aggregator, FailureReport, Statistics};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Finalized statistics over the successfully processed files
    pub statistics: Statistics,
    pub failures: FailureReport,
    /// Files that were still running when the deadline elapsed, or whose task panicked
    pub abandoned: Vec<PathBuf>,
    pub dispatched: usize,
    pub elapsed: Duration,
}

pub struct Dispatcher {
    config: Arc<AnalysisConfig>,
    reader: Arc<dyn ReportReader>,
}

impl Dispatcher {
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_reader(config, Arc::new(FsReportReader))
    }

    pub fn with_reader(config: AnalysisConfig, reader: Arc<dyn ReportReader>) -> Self {
        Self {
            config: Arc::new(config),
            reader,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze every file in the configured source directory
    pub async fn run(&self) -> Result<AnalysisOutcome> {
        let config = self.config.clone();
        // Directory walks block; keep them off the runtime threads
        let files = tokio::task::spawn_blocking(move || discover_files(&config))
            .await
            .map_err(|e| Error::io(&self.config.source_dir, std::io::Error::other(e)))??;
        self.run_files(files).await
    }

    /// Analyze an explicit list of files
    pub async fn run_files(&self, files: Vec<PathBuf>) -> Result<AnalysisOutcome> {
        let started = Instant::now();
        let dispatched = files.len();
        let max_concurrency = self.config.max_concurrency.max(1);

        info!(
            "Dispatching {} files with up to {} in flight",
            dispatched, max_concurrency
        );

        let aggregator = Aggregator::spawn(
            Statistics::new(self.config.bug_category.clone()),
            max_concurrency,
        );
        let semaphore = Arc::new(Semaphore::new(max_concurrency));
        let mut tasks = JoinSet::new();
        let mut in_flight = HashMap::with_capacity(dispatched);

        for path in files {
            let handle = aggregator.handle();
            let semaphore = semaphore.clone();
            let config = self.config.clone();
            let reader = self.reader.clone();
            let task_path = path.clone();

            let abort = tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| Error::Aggregator("worker semaphore closed".to_string()))?;
                process_file(&task_path, &config, reader.as_ref(), &handle).await
            });
            in_flight.insert(abort.id(), path);
        }

        let deadline = self
            .config
            .deadline
            .map(|limit| tokio::time::Instant::now() + limit);
        let mut abandoned = Vec::new();

        loop {
            let next = match deadline {
                Some(at) => match tokio::time::timeout_at(at, tasks.join_next_with_id()).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!(
                            "Deadline reached with {} files unfinished; abandoning them",
                            tasks.len()
                        );
                        break;
                    }
                },
                None => tasks.join_next_with_id().await,
            };

            let Some(joined) = next else {
                break;
            };

            match joined {
                Ok((id, Ok(()))) => {
                    in_flight.remove(&id);
                }
                Ok((id, Err(e))) => {
                    error!(
                        "Aggregation failed while processing {:?}: {}",
                        in_flight.get(&id),
                        e
                    );
                    tasks.abort_all();
                    return Err(e);
                }
                Err(join_error) => {
                    if let Some(path) = in_flight.remove(&join_error.id()) {
                        warn!("Worker for {} did not complete: {}", path.display(), join_error);
                        abandoned.push(path);
                    }
                }
            }
        }

        if !tasks.is_empty() {
            tasks.abort_all();
            // Tasks that finished before the abort landed still count as merged
            while let Some(joined) = tasks.join_next_with_id().await {
                if let Ok((id, _)) = joined {
                    in_flight.remove(&id);
                }
            }
        }
        abandoned.extend(in_flight.into_values());
        abandoned.sort();

        // Every handle lived inside a task; all are gone, so this drains and returns
        let (statistics, mut failures) = aggregator.finish().await?;
        failures.sort();

        let accounted = statistics.total_records() + failures.len() + abandoned.len();
        if accounted != dispatched {
            return Err(Error::Aggregator(format!(
                "dispatched {} files but accounted for {} ({} merged, {} failed, {} abandoned)",
                dispatched,
                accounted,
                statistics.total_records(),
                failures.len(),
                abandoned.len()
            )));
        }

        let statistics = statistics.finalize();
        let elapsed = started.elapsed();

        info!(
            "Processed {} files in {:?}: {} merged, {} failed, {} abandoned",
            dispatched,
            elapsed,
            statistics.total_records(),
            failures.len(),
            abandoned.len()
        );
        debug!("Failure breakdown: {:?}", failures.count_by_kind());

        Ok(AnalysisOutcome {
            statistics,
            failures,
            abandoned,
            dispatched,
            elapsed,
        })
    }
}

/// Analyze the configured directory with the filesystem reader
pub async fn analyze_directory(config: AnalysisConfig) -> Result<AnalysisOutcome> {
    Dispatcher::new(config).run().await
}
