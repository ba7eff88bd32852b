//! Application module
//!
//! This module contains application-level functionality including:
//! - Application settings derived from the command line
//! - Logging setup
//! - Running one analysis and printing its report
//! - Fatal error reporting and exit codes

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

pub use config::AppConfig;
pub use error_handling::{exit_code_for, handle_fatal_error};
pub use logging::init_logging;
pub use runtime::run;
