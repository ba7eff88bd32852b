//! Command-line interface
//!
//! - Argument parsing structures
//! - Mapping of flags onto configuration overrides

pub mod args;

pub use args::Cli;
