//! A real file system that fails on a chosen write.

use async_trait::async_trait;
use hoist_foundation::HoistResult;
use hoist_services::{FileSystem, LocalFileSystem};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Delegates to [`LocalFileSystem`] but fails the `fail_on`-th write
/// (1-based). Every other write, including later ones, succeeds.
pub struct FaultyFileSystem {
    inner: LocalFileSystem,
    fail_on: usize,
    writes: AtomicUsize,
    written: Mutex<Vec<PathBuf>>,
}

impl FaultyFileSystem {
    pub fn failing_write(fail_on: usize) -> Self {
        Self {
            inner: LocalFileSystem::new(),
            fail_on,
            writes: AtomicUsize::new(0),
            written: Mutex::new(Vec::new()),
        }
    }

    /// Number of write attempts so far, failed one included.
    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Paths of successful writes, in order.
    pub fn written(&self) -> Vec<PathBuf> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSystem for FaultyFileSystem {
    async fn read_to_string(&self, path: &Path) -> HoistResult<String> {
        self.inner.read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> HoistResult<()> {
        let attempt = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("injected failure writing {}", path.display()),
            )
            .into());
        }
        self.inner.write(path, contents).await?;
        self.written.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> HoistResult<()> {
        self.inner.remove_file(path).await
    }

    async fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path).await
    }

    async fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path).await
    }

    async fn read_dir(&self, path: &Path) -> HoistResult<Vec<PathBuf>> {
        self.inner.read_dir(path).await
    }
}
