use super::AnalysisConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// Values given on the command line; `None` leaves the lower layer untouched
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_dir: Option<PathBuf>,
    pub max_concurrency: Option<usize>,
    pub deadline: Option<Duration>,
    pub recursive: Option<bool>,
    pub extension: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut AnalysisConfig) {
        if let Some(dir) = self.source_dir {
            config.source_dir = dir;
        }
        if let Some(max) = self.max_concurrency {
            config.max_concurrency = max;
        }
        if let Some(deadline) = self.deadline {
            config.deadline = Some(deadline);
        }
        if let Some(recursive) = self.recursive {
            config.recursive = recursive;
        }
        if let Some(extension) = self.extension {
            config.extension = Some(extension.trim_start_matches('.').to_string());
        }
    }
}

pub async fn load_config_file(path: &Path) -> Result<AnalysisConfig> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    let config: AnalysisConfig = toml::from_str(&content)?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Build the effective configuration: defaults, then file, then environment,
/// then command line
pub async fn resolve_config(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<AnalysisConfig> {
    let mut config = match config_path {
        Some(path) => load_config_file(path).await.map_err(|e| match e {
            Error::Io { path, source } => Error::Config(format!(
                "cannot read config file {}: {source}",
                path.display()
            )),
            other => other,
        })?,
        None => AnalysisConfig::default(),
    };

    config.merge_env_vars()?;
    overrides.apply(&mut config);
    config.validate()?;

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bugstat.toml");
        std::fs::write(
            &path,
            r#"
source_dir = "/var/reports"
max_concurrency = 4
recursive = true
extension = "xml"
bug_category = "Defect"
"#,
        )
        .unwrap();

        let config = load_config_file(&path).await.unwrap();
        assert_eq!(config.source_dir, PathBuf::from("/var/reports"));
        assert_eq!(config.max_concurrency, 4);
        assert!(config.recursive);
        assert_eq!(config.extension.as_deref(), Some("xml"));
        assert_eq!(config.bug_category, "Defect");
    }

    #[tokio::test]
    async fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bugstat.toml");
        std::fs::write(&path, "max_concurrency = \"many\"").unwrap();

        let err = load_config_file(&path).await.unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[tokio::test]
    async fn test_missing_config_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let err = resolve_config(Some(&path), ConfigOverrides::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_zero_deadline_in_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bugstat.toml");
        std::fs::write(&path, "deadline = \"0s\"").unwrap();

        let err = resolve_config(Some(&path), ConfigOverrides::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_overrides_win() {
        let mut config = AnalysisConfig::default().with_max_concurrency(16);
        ConfigOverrides {
            source_dir: Some(PathBuf::from("elsewhere")),
            max_concurrency: Some(2),
            deadline: Some(Duration::from_secs(5)),
            recursive: None,
            extension: Some(".xml".to_string()),
        }
        .apply(&mut config);

        assert_eq!(config.source_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.deadline, Some(Duration::from_secs(5)));
        assert!(!config.recursive);
        assert_eq!(config.extension.as_deref(), Some("xml"));
    }
}
