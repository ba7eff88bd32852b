//! Statistics aggregation
//!
//! - `statistics` - owned aggregate state, merge operations and finalize
//! - `aggregator` - background task that owns the state during a run
//! - `failures` - per-file failure tally

pub mod aggregator;
pub mod failures;
pub mod statistics;

pub use aggregator::{AggregateMessage, Aggregator, AggregatorHandle, MergeRequest};
pub use failures::{FailureKind, FailureReport, FileFailure};
pub use statistics::{DurationSummary, Statistics, DEFAULT_BUG_CATEGORY};
