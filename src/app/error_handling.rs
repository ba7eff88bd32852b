//! Error handling utilities
//!
//! This module provides centralized error handling for the application.

use tracing::error;

/// Exit code for an error that reached the top level.
///
/// Library errors carry their own code; anything else is a general failure.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<crate::error::Error>())
        .map(|e| e.exit_code())
        .unwrap_or(1)
}

/// Handle fatal errors and exit with appropriate status code
///
/// # Verbose Mode Behavior
/// - `verbose = 0`: The error message only
/// - `verbose >= 1`: Includes the full error chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    eprintln!("Error: {error}");
    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code_for(&error))
}
