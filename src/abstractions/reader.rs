//! Source of raw report bytes
//!
//! The dispatcher reads files through [`ReportReader`] so tests can inject
//! slow, failing or panicking inputs without touching the filesystem.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[async_trait]
pub trait ReportReader: Send + Sync {
    /// Read the full content of one report
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Reads reports from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReportReader;

#[async_trait]
impl ReportReader for FsReportReader {
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| Error::io(path, e))
    }
}

#[derive(Debug, Clone)]
enum MockEntry {
    Content { bytes: Vec<u8>, delay: Option<Duration> },
    Unreadable(String),
    Panic,
}

/// In-memory reader for tests
#[derive(Debug, Clone, Default)]
pub struct MockReportReader {
    entries: HashMap<PathBuf, MockEntry>,
}

impl MockReportReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(
            path.into(),
            MockEntry::Content {
                bytes: content.into(),
                delay: None,
            },
        );
        self
    }

    /// Content that only becomes available after `delay`
    pub fn with_delayed_content(
        mut self,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
        delay: Duration,
    ) -> Self {
        self.entries.insert(
            path.into(),
            MockEntry::Content {
                bytes: content.into(),
                delay: Some(delay),
            },
        );
        self
    }

    pub fn with_unreadable(mut self, path: impl Into<PathBuf>, message: &str) -> Self {
        self.entries
            .insert(path.into(), MockEntry::Unreadable(message.to_string()));
        self
    }

    pub fn with_panic(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(path.into(), MockEntry::Panic);
        self
    }

    /// Every path registered with this reader, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.entries.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl ReportReader for MockReportReader {
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match self.entries.get(path) {
            Some(MockEntry::Content { bytes, delay }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(*delay).await;
                }
                Ok(bytes.clone())
            }
            Some(MockEntry::Unreadable(message)) => Err(Error::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, message.clone()),
            )),
            Some(MockEntry::Panic) => panic!("mock reader asked to panic on {}", path.display()),
            None => Err(Error::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not registered"),
            )),
        }
    }
}
