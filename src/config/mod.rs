use crate::error::{Error, Result};
use crate::stats::DEFAULT_BUG_CATEGORY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod loader;

pub use loader::{load_config_file, resolve_config, ConfigOverrides};

pub const ENV_SOURCE_DIR: &str = "BUGSTAT_SOURCE_DIR";
pub const ENV_MAX_CONCURRENCY: &str = "BUGSTAT_MAX_CONCURRENCY";
pub const ENV_DEADLINE: &str = "BUGSTAT_DEADLINE";

fn default_max_concurrency() -> usize {
    64
}

fn default_terminal_statuses() -> Vec<String> {
    vec!["Closed".to_string(), "Resolved".to_string()]
}

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding one XML export per issue
    pub source_dir: PathBuf,

    /// Upper bound on files being read and decoded at once
    pub max_concurrency: usize,

    /// Abandon unfinished files after this long
    #[serde(with = "humantime_serde")]
    pub deadline: Option<Duration>,

    /// Descend into subdirectories
    pub recursive: bool,

    /// Only consider files with this extension (without the dot)
    pub extension: Option<String>,

    /// Category whose records feed the status and duration statistics
    pub bug_category: String,

    /// Statuses that mark a bug as finished
    pub terminal_statuses: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            max_concurrency: default_max_concurrency(),
            deadline: None,
            recursive: false,
            extension: None,
            bug_category: DEFAULT_BUG_CATEGORY.to_string(),
            terminal_statuses: default_terminal_statuses(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_terminal(&self, status: &str) -> bool {
        self.terminal_statuses.iter().any(|s| s == status)
    }

    /// Apply `BUGSTAT_*` environment variables
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_SOURCE_DIR) {
            self.source_dir = PathBuf::from(dir);
        }

        if let Some(max) = lookup(ENV_MAX_CONCURRENCY) {
            self.max_concurrency = max.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_MAX_CONCURRENCY} must be a number, got '{max}'"))
            })?;
        }

        if let Some(deadline) = lookup(ENV_DEADLINE) {
            let parsed = humantime_serde::re::humantime::parse_duration(deadline.trim())
                .map_err(|e| Error::Config(format!("{ENV_DEADLINE} is invalid: {e}")))?;
            self.deadline = Some(parsed);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(Error::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.deadline.is_some_and(|d| d.is_zero()) {
            return Err(Error::Config("deadline must be greater than zero".to_string()));
        }
        if self.bug_category.trim().is_empty() {
            return Err(Error::Config("bug_category must not be empty".to_string()));
        }
        if self.source_dir.as_os_str().is_empty() {
            return Err(Error::Config("source_dir must not be empty".to_string()));
        }
        Ok(())
    }
}
