//! # bugstat
//!
//! Concurrent aggregation of bug-resolution statistics over a directory of
//! issue-tracker XML exports (one issue per file).
//!
//! ## Usage
//!
//! ```bash
//! bugstat <SOURCE_DIR> [-c bugstat.toml] [-j 32] [--deadline 2m] [--format json]
//! ```
//!
//! ## Modules
//!
//! - `abstractions` - Trait-based access to report content
//! - `app` - Logging, runtime entry point and fatal error handling
//! - `cli` - Command-line arguments
//! - `config` - Analysis configuration from file, environment and flags
//! - `dispatch` - File discovery and bounded concurrent processing
//! - `error` - Library error type
//! - `output` - Text and JSON report rendering
//! - `report` - Record decoding and duration calculation
//! - `stats` - Aggregate statistics and the task that owns them
pub mod abstractions;
pub mod app;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod report;
pub mod stats;

pub use config::AnalysisConfig;
pub use dispatch::{analyze_directory, AnalysisOutcome, Dispatcher};
pub use error::{Error, Result};
pub use stats::Statistics;
