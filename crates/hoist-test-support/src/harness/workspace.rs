use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Manages a temporary directory for a test scenario.
/// Cleans up automatically when dropped.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a new empty workspace.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Returns the root path of the workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates a file with content within the workspace.
    /// Automatically creates parent directories.
    pub fn create_file(&self, rel_path: &str, content: &str) {
        let file_path = self.path().join(rel_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent dirs for '{}': {}", rel_path, e)
            });
        }
        fs::write(&file_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", file_path.display(), e));
    }

    /// Reads a file from the workspace.
    pub fn read_file(&self, rel_path: &str) -> String {
        let file_path = self.path().join(rel_path);
        fs::read_to_string(&file_path)
            .unwrap_or_else(|e| panic!("Failed to read file '{}': {}", file_path.display(), e))
    }

    /// Check if a file exists in the workspace.
    pub fn file_exists(&self, rel_path: &str) -> bool {
        self.path().join(rel_path).exists()
    }

    /// Get the absolute path to a file in the workspace.
    pub fn absolute_path(&self, rel_path: &str) -> PathBuf {
        self.path().join(rel_path)
    }

    /// Create an SDK-style `.csproj` at `<dir>/<name>.csproj`.
    pub fn create_csproj(&self, dir: &str, name: &str) -> PathBuf {
        let rel = join_rel(dir, &format!("{}.csproj", name));
        self.create_file(
            &rel,
            r#"<Project Sdk="Microsoft.NET.Sdk">

  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <Nullable>enable</Nullable>
  </PropertyGroup>

</Project>
"#,
        );
        self.absolute_path(&rel)
    }

    /// Create a C# project with the given source files (relative to `dir`).
    /// Returns the manifest path.
    pub fn setup_csharp_project(&self, dir: &str, name: &str, sources: &[(&str, &str)]) -> PathBuf {
        let manifest = self.create_csproj(dir, name);
        for (rel, content) in sources {
            self.create_file(&join_rel(dir, rel), content);
        }
        manifest
    }

    /// Create a classic `.sln` referencing the given manifest paths (as written).
    pub fn create_sln(&self, rel_path: &str, members: &[&str]) -> PathBuf {
        let mut content =
            String::from("Microsoft Visual Studio Solution File, Format Version 12.00\n");
        for (i, member) in members.iter().enumerate() {
            let name = Path::new(&member.replace('\\', "/"))
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("Project{}", i));
            content.push_str(&format!(
                "Project(\"{{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}}\") = \"{}\", \"{}\", \"{{00000000-0000-0000-0000-{:012}}}\"\nEndProject\n",
                name, member, i
            ));
        }
        content.push_str("Global\nEndGlobal\n");
        self.create_file(rel_path, &content);
        self.absolute_path(rel_path)
    }

    /// Create an XML `.slnx` referencing the given manifest paths.
    pub fn create_slnx(&self, rel_path: &str, members: &[&str]) -> PathBuf {
        let projects: String = members
            .iter()
            .map(|m| format!("  <Project Path=\"{}\" />\n", m))
            .collect();
        self.create_file(rel_path, &format!("<Solution>\n{}</Solution>\n", projects));
        self.absolute_path(rel_path)
    }

    /// Every file under the workspace with its content, sorted by relative path.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut files = Vec::new();
        collect_files(self.path(), self.path(), &mut files);
        files.sort();
        files
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn join_rel(dir: &str, rel: &str) -> String {
    if dir.is_empty() || dir == "." {
        rel.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), rel)
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<(String, String)>) {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to list '{}': {}", dir.display(), e));
    for entry in entries {
        let path = entry.expect("Failed to read dir entry").path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let rel = path
                .strip_prefix(root)
                .expect("Path outside workspace")
                .to_string_lossy()
                .replace('\\', "/");
            let content = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read '{}': {}", path.display(), e));
            out.push((rel, content));
        }
    }
}
