//! The download root and name resolution inside it

use std::fs::Metadata;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{StorageError, StorageResult};
use crate::listing::{list_files, FileEntry, ListMode};

/// Prefix given to the output of a compression
pub const COMPRESSED_PREFIX: &str = "compressed_";

/// Directory every file command operates in
#[derive(Debug, Clone)]
pub struct DownloadRoot {
    path: PathBuf,
}

impl DownloadRoot {
    /// Open the download root, creating it if absent
    ///
    /// The stored path is canonical, so everything resolved from it is
    /// absolute.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path).map_err(|e| StorageError::io("create_dir_all", path, e))?;
        let path = path
            .canonicalize()
            .map_err(|e| StorageError::io("canonicalize", path, e))?;

        tracing::info!("Download root: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a user-supplied relative name inside the root
    ///
    /// Absolute names and names with `.`/`..` components are rejected so a
    /// command can never reach outside the root.
    pub fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyName);
        }

        let relative = Path::new(name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        Ok(self.path.join(relative))
    }

    /// Path the compressed copy of `name` is written to
    ///
    /// `dir/clip.mkv` becomes `<root>/dir/compressed_clip.mkv`.
    pub fn compressed_path(&self, name: &str) -> StorageResult<PathBuf> {
        let source = self.resolve(name)?;
        let file_name = source
            .file_name()
            .ok_or_else(|| StorageError::InvalidName(name.to_string()))?
            .to_string_lossy();
        Ok(source.with_file_name(format!("{}{}", COMPRESSED_PREFIX, file_name)))
    }

    /// Metadata for `path`, or `None` when nothing exists there
    pub async fn stat(&self, path: &Path) -> StorageResult<Option<Metadata>> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(Some(meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io("metadata", path, e)),
        }
    }

    pub async fn remove_file(&self, path: &Path) -> StorageResult<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| StorageError::io("remove_file", path, e))?;
        tracing::info!("Removed {}", path.display());
        Ok(())
    }

    /// Files under the root, most recently modified first
    pub fn list(&self, mode: ListMode) -> StorageResult<Vec<FileEntry>> {
        list_files(&self.path, mode)
    }
}
