//! User interaction seam
//!
//! The orchestrators never print. Notifications, choices and the preview go
//! through [`UserInteraction`]; the binary implements it for a terminal and
//! tests script it.

use serde::Serialize;
use std::path::PathBuf;

#[cfg_attr(test, mockall::automock)]
pub trait UserInteraction: Send + Sync {
    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);

    /// Ask the user to pick one of `options`. `None` means the prompt was
    /// dismissed, which callers treat like the last (cancelling) option.
    fn choose(&self, prompt: &str, options: &[String]) -> Option<usize>;

    fn show_preview(&self, preview: &ConsolidationPreview);
}

/// One file that will lose its using directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePreview {
    pub path: PathBuf,
    pub import_count: usize,
}

/// Everything shown before a consolidation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationPreview {
    pub project_name: String,
    pub project_dir: PathBuf,
    pub consolidated_path: PathBuf,
    pub files: Vec<FilePreview>,
    /// Distinct directives moved out of source files.
    pub moved_imports: usize,
    /// Entries the consolidated file gains.
    pub new_entries: usize,
    pub existing_content: String,
    pub new_content: String,
}

impl ConsolidationPreview {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Build an owned option list for [`UserInteraction::choose`].
pub(crate) fn options(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}
