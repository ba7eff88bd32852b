//! Per-file failures collected during a run

use crate::error::Error;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Io,
    Decode,
    Parse,
}

impl FailureKind {
    pub fn as_str(&self) -> &str {
        match self {
            FailureKind::Io => "io",
            FailureKind::Decode => "decode",
            FailureKind::Parse => "parse",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Kind of a per-file error; `None` for errors that end the whole run
    pub fn classify(error: &Error) -> Option<Self> {
        match error {
            Error::Io { .. } => Some(FailureKind::Io),
            Error::Decode { .. } => Some(FailureKind::Decode),
            Error::Parse { .. } => Some(FailureKind::Parse),
            _ => None,
        }
    }
}

/// A file that was skipped because it could not be read, decoded or parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

impl FileFailure {
    pub fn from_error(path: impl Into<PathBuf>, error: &Error) -> Option<Self> {
        Some(Self {
            path: path.into(),
            kind: FailureKind::classify(error)?,
            message: error.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FailureReport {
    failures: Vec<FileFailure>,
}

impl FailureReport {
    pub fn push(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    pub fn count_by_kind(&self) -> BTreeMap<FailureKind, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Order by path so reports do not depend on completion order
    pub fn sort(&mut self) {
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}
