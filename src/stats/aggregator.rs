//! Single-owner aggregation task
//!
//! Workers never touch [`Statistics`] directly. They send messages through an
//! [`AggregatorHandle`] to one background task that owns the statistics and
//! applies merges in arrival order. [`Aggregator::finish`] closes the channel
//! and waits for the task to drain it, so every merge sent before `finish` is
//! reflected in the returned statistics.

use crate::error::{Error, Result};
use crate::report::Record;
use crate::stats::failures::{FailureReport, FileFailure};
use crate::stats::statistics::Statistics;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A decoded record ready to be folded into the statistics
#[derive(Debug)]
pub struct MergeRequest {
    pub path: PathBuf,
    pub record: Record,
    /// Present only for bugs in a terminal status with a resolution time
    pub duration_secs: Option<f64>,
}

#[derive(Debug)]
pub enum AggregateMessage {
    Merge(Box<MergeRequest>),
    Failed(FileFailure),
}

/// Cloneable sender side given to each worker
#[derive(Debug, Clone)]
pub struct AggregatorHandle {
    tx: mpsc::Sender<AggregateMessage>,
}

impl AggregatorHandle {
    pub async fn merge(&self, request: MergeRequest) -> Result<()> {
        let path = request.path.clone();
        self.tx
            .send(AggregateMessage::Merge(Box::new(request)))
            .await
            .map_err(|_| {
                Error::Aggregator(format!(
                    "aggregator stopped before merging {}",
                    path.display()
                ))
            })
    }

    pub async fn fail(&self, failure: FileFailure) -> Result<()> {
        let path = failure.path.clone();
        self.tx
            .send(AggregateMessage::Failed(failure))
            .await
            .map_err(|_| {
                Error::Aggregator(format!(
                    "aggregator stopped before recording failure of {}",
                    path.display()
                ))
            })
    }
}

pub struct Aggregator {
    tx: mpsc::Sender<AggregateMessage>,
    worker: JoinHandle<(Statistics, FailureReport)>,
}

impl Aggregator {
    /// Spawn the owning task; `buffer` bounds the number of queued messages
    pub fn spawn(statistics: Statistics, buffer: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<AggregateMessage>(buffer.max(1));

        let worker = tokio::spawn(async move {
            debug!("Aggregator started");
            let mut statistics = statistics;
            let mut failures = FailureReport::default();
            let mut merged = 0usize;

            while let Some(message) = rx.recv().await {
                match message {
                    AggregateMessage::Merge(request) => {
                        statistics.merge(&request.record, request.duration_secs);
                        merged += 1;
                        debug!(
                            "Merged {} ({}, {})",
                            request.path.display(),
                            request.record.issue_type,
                            request.record.status
                        );
                    }
                    AggregateMessage::Failed(failure) => {
                        failures.push(failure);
                    }
                }
            }

            info!(
                "Aggregator drained: {} merged, {} failed",
                merged,
                failures.len()
            );
            (statistics, failures)
        });

        Self { tx, worker }
    }

    pub fn handle(&self) -> AggregatorHandle {
        AggregatorHandle {
            tx: self.tx.clone(),
        }
    }

    /// Close the channel and wait for every queued message to be applied.
    ///
    /// Returns once all [`AggregatorHandle`] clones have been dropped and the
    /// task has exited.
    pub async fn finish(self) -> Result<(Statistics, FailureReport)> {
        let Self { tx, worker } = self;
        drop(tx);
        worker
            .await
            .map_err(|e| Error::Aggregator(format!("aggregator task failed: {e}")))
    }
}
