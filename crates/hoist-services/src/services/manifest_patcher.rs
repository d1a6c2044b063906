//! Keeps a project manifest referencing the consolidated file.

use super::filesystem::FileSystem;
use hoist_foundation::HoistResult;
use hoist_lang_csharp::manifest::{analyze_manifest_content, ensure_referenced};
use std::path::Path;
use tracing::{debug, info};

/// Patch `manifest_path` so it references `file_name`.
///
/// Returns whether the manifest was written; it is only written when the
/// content actually changes.
pub async fn patch_manifest(
    fs: &dyn FileSystem,
    manifest_path: &Path,
    file_name: &str,
) -> HoistResult<bool> {
    let content = fs.read_to_string(manifest_path).await?;
    let project = analyze_manifest_content(&content, manifest_path)?;

    match ensure_referenced(&content, file_name, project.is_sdk_style())? {
        Some(patched) => {
            fs.write(manifest_path, &patched).await?;
            info!(
                manifest = %manifest_path.display(),
                project = %project.name,
                sdk_style = project.is_sdk_style(),
                "Added consolidated file reference to manifest"
            );
            Ok(true)
        }
        None => {
            debug!(manifest = %manifest_path.display(), "Manifest already references consolidated file");
            Ok(false)
        }
    }
}
