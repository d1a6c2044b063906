//! Backup log for one project run
//!
//! Snapshots are taken before the first write. On failure they are replayed
//! in reverse: files that existed get their original text back, files that
//! did not exist are deleted.

use super::filesystem::FileSystem;
use hoist_foundation::HoistResult;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Original state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    /// `None` when the file did not exist.
    pub original: Option<String>,
}

/// What a rollback managed to restore.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RollbackReport {
    pub restored: usize,
    pub removed: usize,
    pub errors: Vec<String>,
}

impl RollbackReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[must_use = "a transaction must be committed or rolled back"]
#[derive(Debug, Default)]
pub struct Transaction {
    snapshots: Vec<Snapshot>,
    finished: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file's original text when the caller already holds it.
    pub fn record(&mut self, path: impl Into<PathBuf>, original: Option<String>) {
        let path = path.into();
        if self.contains(&path) {
            return;
        }
        self.snapshots.push(Snapshot { path, original });
    }

    /// Read and record a file's current state.
    pub async fn snapshot(&mut self, fs: &dyn FileSystem, path: &Path) -> HoistResult<()> {
        if self.contains(path) {
            return Ok(());
        }
        let original = if fs.exists(path).await {
            Some(fs.read_to_string(path).await?)
        } else {
            None
        };
        self.record(path, original);
        Ok(())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.snapshots.iter().any(|s| s.path == path)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Discard the log. Returns how many files were covered.
    pub fn commit(mut self) -> usize {
        self.finished = true;
        let count = self.snapshots.len();
        self.snapshots.clear();
        debug!(files_count = count, "Transaction committed");
        count
    }

    /// Replay the log in reverse. Restoration is best-effort: failures are
    /// collected, never retried.
    pub async fn rollback(mut self, fs: &dyn FileSystem) -> RollbackReport {
        self.finished = true;
        let snapshots = std::mem::take(&mut self.snapshots);

        warn!(files_count = snapshots.len(), "Rolling back file modifications");

        let mut report = RollbackReport::default();
        for snapshot in snapshots.into_iter().rev() {
            match snapshot.original {
                Some(original) => match fs.write(&snapshot.path, &original).await {
                    Ok(()) => {
                        report.restored += 1;
                        debug!(
                            file_path = %snapshot.path.display(),
                            "Restored original content during rollback"
                        );
                    }
                    Err(e) => report.errors.push(format!(
                        "Failed to restore file {} during rollback: {}",
                        snapshot.path.display(),
                        e
                    )),
                },
                None => {
                    if !fs.exists(&snapshot.path).await {
                        continue;
                    }
                    match fs.remove_file(&snapshot.path).await {
                        Ok(()) => {
                            report.removed += 1;
                            debug!(
                                file_path = %snapshot.path.display(),
                                "Removed newly created file during rollback"
                            );
                        }
                        Err(e) => report.errors.push(format!(
                            "Failed to remove file {} during rollback: {}",
                            snapshot.path.display(),
                            e
                        )),
                    }
                }
            }
        }

        if !report.is_clean() {
            error!(
                error_count = report.errors.len(),
                errors = ?report.errors,
                "Rollback completed with errors"
            );
        }
        report
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished && !self.snapshots.is_empty() {
            error!(
                files_count = self.snapshots.len(),
                "Transaction dropped without commit or rollback"
            );
        }
    }
}
