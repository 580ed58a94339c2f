//! Recursive listing of downloaded files

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::{StorageError, StorageResult};

/// Number of entries kept by [`ListMode::Latest`]
pub const LATEST_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// The most recently modified files only
    #[default]
    Latest,
    /// Every file in the tree
    All,
}

impl ListMode {
    /// `all` selects [`ListMode::All`], anything else [`ListMode::Latest`]
    pub fn from_arg(arg: &str) -> Self {
        if arg.trim() == "all" {
            ListMode::All
        } else {
            ListMode::Latest
        }
    }
}

/// A file found under the download root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// List every non-directory entry below `root`, newest first
///
/// With [`ListMode::Latest`] the result is cut to [`LATEST_LIMIT`] entries
/// after sorting. Entries that vanish or become unreadable mid-walk are
/// skipped; failing to read the root itself is an error.
pub fn list_files(root: &Path, mode: ListMode) -> StorageResult<Vec<FileEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(StorageError::Walk {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let modified = match entry.metadata().map(|m| m.modified()) {
            Ok(Ok(modified)) => modified,
            Ok(Err(err)) => {
                tracing::warn!("No mtime for {}: {}", entry.path().display(), err);
                SystemTime::UNIX_EPOCH
            }
            Err(err) => {
                tracing::warn!("Skipping {}: {}", entry.path().display(), err);
                continue;
            }
        };

        entries.push(FileEntry {
            path: entry.into_path(),
            modified,
        });
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));

    if mode == ListMode::Latest {
        entries.truncate(LATEST_LIMIT);
    }

    tracing::debug!("Listed {} file(s) under {}", entries.len(), root.display());
    Ok(entries)
}
