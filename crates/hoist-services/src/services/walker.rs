//! Directory walker for source discovery

use hoist_config::ConsolidationConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Which files a walk yields.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub source_suffix: String,
    /// The consolidated declarations file, never treated as a source.
    pub excluded_file_name: String,
    /// Directories holding a file with this suffix belong to another project.
    pub manifest_suffix: String,
}

impl WalkOptions {
    pub fn from_config(config: &ConsolidationConfig) -> Self {
        Self {
            source_suffix: config.source_suffix.clone(),
            excluded_file_name: config.consolidated_file_name.clone(),
            manifest_suffix: config.project_manifest_suffix.clone(),
        }
    }
}

/// Depth-first walk yielding source files under `root`.
///
/// Directories named in `skip_names` or starting with `.` are pruned, apart
/// from the root itself, and so are nested project directories. Unreadable
/// entries are logged and skipped.
pub fn walk(root: &Path, skip_names: &[String], options: &WalkOptions) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(is_pruned(entry, skip_names)
                    || is_nested_project(entry, &options.manifest_suffix))
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    path = ?e.path(),
                    error = %e,
                    "Skipping unreadable entry"
                );
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if ends_with_ignore_case(&name, &options.source_suffix)
            && !name.eq_ignore_ascii_case(&options.excluded_file_name)
        {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = files.len(), "Walk complete");
    files
}

fn is_pruned(entry: &DirEntry, skip_names: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || skip_names.iter().any(|skip| skip == name.as_ref())
}

fn is_nested_project(entry: &DirEntry, manifest_suffix: &str) -> bool {
    if !entry.file_type().is_dir() || manifest_suffix.is_empty() {
        return false;
    }
    let entries = match std::fs::read_dir(entry.path()) {
        Ok(entries) => entries,
        Err(_) => return false,
    };
    let nested = entries.flatten().any(|child| {
        child.file_type().is_ok_and(|t| t.is_file())
            && ends_with_ignore_case(&child.file_name().to_string_lossy(), manifest_suffix)
    });
    if nested {
        debug!(dir = %entry.path().display(), "Skipping nested project");
    }
    nested
}

pub(crate) fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
