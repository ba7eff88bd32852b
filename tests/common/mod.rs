//! Common test utilities for building export directories

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One issue export in the Jira RSS layout
pub fn jira_export(issue_type: &str, status: &str, created: &str, resolved: Option<&str>) -> String {
    let resolved = resolved
        .map(|r| format!("      <resolved>{r}</resolved>\n"))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="0.92">
  <channel>
    <title>Apache JIRA</title>
    <item>
      <title>Sample issue</title>
      <type id="1" iconUrl="https://issues.apache.org/jira/images/icons/bug.png">{issue_type}</type>
      <status id="5">{status}</status>
      <created>{created}</created>
{resolved}    </item>
  </channel>
</rss>
"#
    )
}

/// A bug created at midnight on Mon, 2 Jan 2006 and resolved `secs` later
pub fn resolved_bug(status: &str, secs: u32) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    jira_export(
        "Bug",
        status,
        "Mon, 2 Jan 2006 00:00:00 +0000",
        Some(&format!(
            "Mon, 2 Jan 2006 {hours:02}:{minutes:02}:{seconds:02} +0000"
        )),
    )
}

/// Temporary directory of export files
pub struct ReportDir {
    temp_dir: TempDir,
}

impl ReportDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn with_file(self, name: &str, content: &str) -> Result<Self> {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

/// The three-file directory used across scenario tests
pub fn scenario_dir() -> Result<ReportDir> {
    ReportDir::new()?
        .with_file("HBASE-1.xml", &resolved_bug("Resolved", 100))?
        .with_file("HBASE-2.xml", &resolved_bug("Resolved", 300))?
        .with_file(
            "HBASE-3.xml",
            &jira_export("Task", "Open", "Tue, 3 Jan 2006 09:30:00 +0000", None),
        )
}
