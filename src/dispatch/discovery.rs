//! Enumeration of report files under the source directory

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Regular files under `config.source_dir`, sorted by path
pub fn discover_files(config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let root = &config.source_dir;
    let metadata = std::fs::metadata(root).map_err(|e| Error::io(root, e))?;
    if !metadata.is_dir() {
        return Err(Error::Config(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(wanted) = config.extension.as_deref() {
            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted));
            if !matches {
                continue;
            }
        }

        files.push(entry.into_path());
    }

    files.sort();
    debug!("Discovered {} files under {}", files.len(), root.display());
    Ok(files)
}
