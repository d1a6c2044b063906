//! Finding the project a path belongs to

use super::filesystem::FileSystem;
use super::walker::ends_with_ignore_case;
use std::path::{Path, PathBuf};
use tracing::debug;

/// First project manifest file in `dir`, by sorted name.
pub async fn find_project_manifest(
    fs: &dyn FileSystem,
    dir: &Path,
    manifest_suffix: &str,
) -> Option<PathBuf> {
    let entries = match fs.read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Cannot list directory");
            return None;
        }
    };

    for path in entries {
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| ends_with_ignore_case(n, manifest_suffix));
        if matches && fs.is_file(&path).await {
            return Some(path);
        }
    }
    None
}

/// Walk upward from the file's directory to the first one holding a manifest.
pub async fn find_owning_project_dir(
    fs: &dyn FileSystem,
    file: &Path,
    manifest_suffix: &str,
) -> Option<PathBuf> {
    let mut current = file.parent();
    while let Some(dir) = current {
        if find_project_manifest(fs, dir, manifest_suffix).await.is_some() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filesystem::LocalFileSystem;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_finds_nearest_project() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("App/Services/Internal")).unwrap();
        fs::write(root.join("App/App.csproj"), "<Project />").unwrap();
        fs::write(root.join("App/Services/Internal/Worker.cs"), "").unwrap();

        let owner = find_owning_project_dir(
            &LocalFileSystem,
            &root.join("App/Services/Internal/Worker.cs"),
            ".csproj",
        )
        .await;
        assert_eq!(owner, Some(root.join("App")));
    }

    #[tokio::test]
    async fn test_inner_project_wins() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Outer/Inner")).unwrap();
        fs::write(root.join("Outer/Outer.csproj"), "").unwrap();
        fs::write(root.join("Outer/Inner/Inner.csproj"), "").unwrap();

        let owner =
            find_owning_project_dir(&LocalFileSystem, &root.join("Outer/Inner/A.cs"), ".csproj")
                .await;
        assert_eq!(owner, Some(root.join("Outer/Inner")));
    }

    #[tokio::test]
    async fn test_first_manifest_by_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Zeta.csproj"), "").unwrap();
        fs::write(dir.path().join("Alpha.csproj"), "").unwrap();

        let manifest = find_project_manifest(&LocalFileSystem, dir.path(), ".csproj").await;
        assert_eq!(manifest, Some(dir.path().join("Alpha.csproj")));
    }

    #[tokio::test]
    async fn test_directory_named_like_a_manifest_is_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("App/Assets.csproj")).unwrap();
        fs::write(root.join("App/Assets.csproj/Logo.cs"), "").unwrap();

        let manifest = find_project_manifest(&LocalFileSystem, &root.join("App"), ".csproj").await;
        assert_eq!(manifest, None);

        fs::write(root.join("App/Web.csproj"), "<Project />").unwrap();
        let manifest = find_project_manifest(&LocalFileSystem, &root.join("App"), ".csproj").await;
        assert_eq!(manifest, Some(root.join("App/Web.csproj")));

        let owner = find_owning_project_dir(
            &LocalFileSystem,
            &root.join("App/Assets.csproj/Logo.cs"),
            ".csproj",
        )
        .await;
        assert_eq!(owner, Some(root.join("App")));
    }

    #[tokio::test]
    async fn test_no_manifest_anywhere() {
        let dir = tempdir().unwrap();
        let manifest = find_project_manifest(&LocalFileSystem, dir.path(), ".csproj").await;
        assert_eq!(manifest, None);
    }
}
