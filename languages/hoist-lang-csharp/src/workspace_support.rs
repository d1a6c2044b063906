//! Solution (`.sln` / `.slnx`) member listing.
//!
//! A solution is only ever read: hoist needs the project manifests it
//! references, nothing else.

use hoist_foundation::{HoistError, HoistResult};
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::path::Path;
use tracing::debug;

// Regex to find project entries in a .sln file.
// Example: Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "MyProject", "MyProject\MyProject.csproj", "{E6B4C3A6-5A25-48F1-B244-933A354E1BFB}"
static PROJECT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Project\("\{(?P<type_guid>[^}]+)\}"\)\s*=\s*"(?P<name>[^"]+)"\s*,\s*"(?P<path>[^"]+)"\s*,\s*"\{(?P<proj_guid>[^}]+)\}""#)
        .expect("Invalid regex for SLN projects")
});

/// Lists the project manifests an aggregate manifest references.
pub trait ManifestReader: Send + Sync {
    /// Short name used in logs, e.g. `sln`.
    fn format_name(&self) -> &'static str;

    /// Member paths exactly as written (relative, possibly with `\`),
    /// keeping only those that end with the project manifest suffix.
    fn member_paths(&self, content: &str) -> HoistResult<Vec<String>>;
}

/// Classic text solution files.
pub struct SlnReader {
    manifest_suffix: String,
}

impl SlnReader {
    pub fn new(manifest_suffix: impl Into<String>) -> Self {
        Self {
            manifest_suffix: manifest_suffix.into(),
        }
    }
}

impl ManifestReader for SlnReader {
    fn format_name(&self) -> &'static str {
        "sln"
    }

    fn member_paths(&self, content: &str) -> HoistResult<Vec<String>> {
        Ok(PROJECT_REGEX
            .captures_iter(content)
            .map(|cap| cap["path"].to_string())
            .filter(|path| has_suffix(path, &self.manifest_suffix))
            .collect())
    }
}

/// XML solution files: every `Project` element's `Path`, at any depth
/// (projects may sit inside `Folder` elements).
pub struct SlnxReader {
    manifest_suffix: String,
}

impl SlnxReader {
    pub fn new(manifest_suffix: impl Into<String>) -> Self {
        Self {
            manifest_suffix: manifest_suffix.into(),
        }
    }
}

impl ManifestReader for SlnxReader {
    fn format_name(&self) -> &'static str {
        "slnx"
    }

    fn member_paths(&self, content: &str) -> HoistResult<Vec<String>> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(true);

        let mut paths = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"Project" => {
                    for attr in e.attributes() {
                        let attr = attr.map_err(|err| {
                            HoistError::manifest(format!("Invalid attribute in .slnx: {}", err))
                        })?;
                        if attr.key.local_name().as_ref() != b"Path" {
                            continue;
                        }
                        let value = attr.unescape_value().map_err(|err| {
                            HoistError::manifest(format!("Invalid Path value in .slnx: {}", err))
                        })?;
                        if has_suffix(&value, &self.manifest_suffix) {
                            paths.push(value.into_owned());
                        } else {
                            debug!(path = %value, "Skipping non-project solution entry");
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(HoistError::manifest(format!(
                        "Invalid XML in .slnx at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }
        Ok(paths)
    }
}

/// Pick the reader for an aggregate manifest by its extension.
pub fn reader_for(path: &Path, manifest_suffix: &str) -> Option<Box<dyn ManifestReader>> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "sln" => Some(Box::new(SlnReader::new(manifest_suffix))),
        "slnx" => Some(Box::new(SlnxReader::new(manifest_suffix))),
        _ => None,
    }
}

/// True for `.sln` and `.slnx` paths.
pub fn is_aggregate_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("sln") || e.eq_ignore_ascii_case("slnx"))
        .unwrap_or(false)
}

fn has_suffix(path: &str, suffix: &str) -> bool {
    path.len() >= suffix.len()
        && path.is_char_boundary(path.len() - suffix.len())
        && path[path.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLN_CONTENT: &str = r#"
Microsoft Visual Studio Solution File, Format Version 12.00
# Visual Studio Version 17
VisualStudioVersion = 17.0.31903.59
MinimumVisualStudioVersion = 10.0.40219.1
Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "MyWebApp", "MyWebApp\MyWebApp.csproj", "{E6B4C3A6-5A25-48F1-B244-933A354E1BFB}"
EndProject
Project("{2150E333-8FDC-42A3-9474-1A3956D46DE8}") = "docs", "docs", "{0C4B5E8A-1111-2222-3333-444455556666}"
EndProject
Project("{9A19103F-16F7-4668-BE54-9A1E7A4F7556}") = "MyLibrary", "src\MyLibrary\MyLibrary.csproj", "{A1B2C3D4-E5F6-7890-1234-567890ABCDEF}"
EndProject
Project("{F2A71F9B-5D33-465A-A702-920D77279786}") = "Scripts", "Scripts\Scripts.fsproj", "{B1B2C3D4-E5F6-7890-1234-567890ABCDEF}"
EndProject
Global
	GlobalSection(SolutionProperties) = preSolution
		HideSolutionNode = FALSE
	EndGlobalSection
EndGlobal
"#;

    #[test]
    fn test_sln_lists_csproj_members_only() {
        let members = SlnReader::new(".csproj").member_paths(SLN_CONTENT).unwrap();
        assert_eq!(
            members,
            vec![
                "MyWebApp\\MyWebApp.csproj".to_string(),
                "src\\MyLibrary\\MyLibrary.csproj".to_string(),
            ]
        );
    }

    #[test]
    fn test_sln_without_projects() {
        let members = SlnReader::new(".csproj")
            .member_paths("Microsoft Visual Studio Solution File, Format Version 12.00\nGlobal\nEndGlobal\n")
            .unwrap();
        assert!(members.is_empty());
    }

    #[test]
    fn test_slnx_nested_folders() {
        let content = r#"<Solution>
  <Folder Name="/src/">
    <Project Path="src/Api/Api.csproj" />
    <Project Path="src/Web/Web.CSPROJ">
      <BuildType Project="Release" />
    </Project>
  </Folder>
  <Project Path="tests\Api.Tests\Api.Tests.csproj" />
  <Project Path="tools/Build.fsproj" />
</Solution>"#;
        let members = SlnxReader::new(".csproj").member_paths(content).unwrap();
        assert_eq!(
            members,
            vec![
                "src/Api/Api.csproj".to_string(),
                "src/Web/Web.CSPROJ".to_string(),
                "tests\\Api.Tests\\Api.Tests.csproj".to_string(),
            ]
        );
    }

    #[test]
    fn test_slnx_invalid_xml() {
        let result = SlnxReader::new(".csproj").member_paths("<Solution><Project Path=\"a.csproj\"></Solution>");
        assert!(matches!(result, Err(HoistError::Manifest { .. })));
    }

    #[test]
    fn test_reader_for_extension() {
        assert_eq!(reader_for(Path::new("a/App.sln"), ".csproj").unwrap().format_name(), "sln");
        assert_eq!(reader_for(Path::new("App.SLNX"), ".csproj").unwrap().format_name(), "slnx");
        assert!(reader_for(Path::new("App.csproj"), ".csproj").is_none());
        assert!(reader_for(Path::new("sln"), ".csproj").is_none());
    }

    #[test]
    fn test_is_aggregate_manifest() {
        assert!(is_aggregate_manifest(Path::new("x/All.sln")));
        assert!(is_aggregate_manifest(Path::new("All.slnx")));
        assert!(!is_aggregate_manifest(Path::new("All.csproj")));
    }
}
