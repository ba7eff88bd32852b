//! Abstraction layers for external inputs
//!
//! Trait-based access to report content so the dispatcher can be exercised
//! without a real directory of exports.

pub mod reader;

pub use reader::{FsReportReader, MockReportReader, ReportReader};
