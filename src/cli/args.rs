//! CLI argument structures

use crate::config::ConfigOverrides;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Aggregate bug-resolution statistics over a directory of issue exports
#[derive(Parser, Debug)]
#[command(name = "bugstat")]
#[command(about = "bugstat - Aggregate bug-resolution statistics from issue-tracker XML exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding one XML export per issue
    pub source_dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Maximum number of files processed at once
    #[arg(short = 'j', long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Abandon files still in progress after this long (e.g. "30s", "2m")
    #[arg(long, value_name = "DURATION", value_parser = parse_deadline)]
    pub deadline: Option<Duration>,

    /// Descend into subdirectories
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Only read files with this extension
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Report format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    /// Command-line values that take precedence over file and environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_dir: self.source_dir.clone(),
            max_concurrency: self.max_concurrency,
            deadline: self.deadline,
            recursive: self.recursive.then_some(true),
            extension: self.extension.clone(),
        }
    }
}

fn parse_deadline(value: &str) -> Result<Duration, String> {
    let deadline = humantime_serde::re::humantime::parse_duration(value)
        .map_err(|e| format!("invalid duration '{value}': {e}"))?;
    if deadline.is_zero() {
        return Err("deadline must be greater than zero".to_string());
    }
    Ok(deadline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "bugstat",
            "reports",
            "-c",
            "bugstat.toml",
            "-j",
            "8",
            "--deadline",
            "1m 30s",
            "--recursive",
            "--extension",
            "xml",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.source_dir, Some(PathBuf::from("reports")));
        assert_eq!(cli.config, Some(PathBuf::from("bugstat.toml")));
        assert_eq!(cli.max_concurrency, Some(8));
        assert_eq!(cli.deadline, Some(Duration::from_secs(90)));
        assert!(cli.recursive);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_defaults_leave_overrides_empty() {
        let cli = Cli::try_parse_from(["bugstat"]).unwrap();
        let overrides = cli.overrides();
        assert!(overrides.source_dir.is_none());
        assert!(overrides.max_concurrency.is_none());
        assert!(overrides.recursive.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_rejects_bad_deadline() {
        assert!(Cli::try_parse_from(["bugstat", "--deadline", "soon"]).is_err());
        assert!(Cli::try_parse_from(["bugstat", "--deadline", "0s"]).is_err());
    }
}
