//! File system seam
//!
//! Every read and write the orchestrators perform goes through [`FileSystem`]
//! so tests can inject failures at exact points of a run.

use async_trait::async_trait;
use hoist_foundation::HoistResult;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> HoistResult<String>;

    /// Replace the whole file. Parent directories must exist.
    async fn write(&self, path: &Path, contents: &str) -> HoistResult<()>;

    async fn remove_file(&self, path: &Path) -> HoistResult<()>;

    async fn exists(&self, path: &Path) -> bool;

    /// True only for regular files.
    async fn is_file(&self, path: &Path) -> bool;

    /// Entries of a directory, sorted by path.
    async fn read_dir(&self, path: &Path) -> HoistResult<Vec<PathBuf>>;
}

/// [`FileSystem`] backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn read_to_string(&self, path: &Path) -> HoistResult<String> {
        Ok(fs::read_to_string(path).await?)
    }

    async fn write(&self, path: &Path, contents: &str) -> HoistResult<()> {
        Ok(fs::write(path, contents).await?)
    }

    async fn remove_file(&self, path: &Path) -> HoistResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }

    async fn read_dir(&self, path: &Path) -> HoistResult<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            paths.push(entry.path());
        }
        paths.sort();
        Ok(paths)
    }
}
