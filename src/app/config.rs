//! Application configuration
//!
//! Settings that shape the process rather than the analysis itself.

use crate::output::OutputFormat;

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Report format written to stdout
    pub format: OutputFormat,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            format: OutputFormat::Text,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            2 => "trace,walkdir=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(AppConfig::new(1).log_level(), "debug");
        assert_eq!(AppConfig::new(2).log_level(), "trace,walkdir=debug");
        assert_eq!(AppConfig::new(7).log_level(), "trace");
    }
}
