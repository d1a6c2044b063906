//! C# project manifest handling
//!
//! Reads the bits of a `.csproj` hoist cares about and patches the manifest
//! so it references the consolidated declarations file. Patching is textual
//! so comments, ordering and formatting of the rest of the file survive.

use hoist_foundation::{HoistError, HoistResult};
use serde::Deserialize;
use std::path::Path;

// Structs for deserializing .csproj XML
#[derive(Debug, Deserialize, PartialEq, Default)]
struct Project {
    #[serde(rename = "@Sdk", default)]
    sdk: Option<String>,
    #[serde(rename = "Sdk", default)]
    sdk_elements: Vec<SdkElement>,
    #[serde(rename = "PropertyGroup", default)]
    property_groups: Vec<PropertyGroup>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct SdkElement {
    #[serde(rename = "@Name")]
    name: String,
}

#[derive(Debug, Deserialize, PartialEq, Default)]
struct PropertyGroup {
    #[serde(rename = "AssemblyName", default)]
    assembly_name: Option<String>,
}

/// What the orchestrators need to know about a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub sdk: Option<String>,
}

impl ProjectInfo {
    /// SDK-style projects compile every `*.cs` under the project implicitly.
    pub fn is_sdk_style(&self) -> bool {
        self.sdk.is_some()
    }
}

/// Analyze `.csproj` content. The name falls back to the file stem.
pub fn analyze_manifest_content(content: &str, path: &Path) -> HoistResult<ProjectInfo> {
    let project: Project = quick_xml::de::from_str(content).map_err(|e| {
        HoistError::manifest(format!(
            "Invalid XML in {}: {}",
            path.display(),
            e
        ))
    })?;

    let name = project
        .property_groups
        .iter()
        .find_map(|p| p.assembly_name.as_ref())
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
        .ok_or_else(|| {
            HoistError::manifest("Could not determine project name from manifest or file path")
        })?;

    let sdk = project
        .sdk
        .filter(|s| !s.trim().is_empty())
        .or_else(|| project.sdk_elements.into_iter().next().map(|e| e.name));

    Ok(ProjectInfo { name, sdk })
}

/// The item that references the consolidated file.
///
/// SDK-style projects already include every source file, so an `Include`
/// would duplicate the item; `Update` only marks it.
pub fn reference_entry(file_name: &str, sdk_style: bool) -> String {
    let verb = if sdk_style { "Update" } else { "Include" };
    format!(r#"<Compile {}="{}" />"#, verb, file_name)
}

/// Make sure `content` references `file_name`.
///
/// Returns `Ok(None)` when the file name already appears anywhere in the
/// manifest, otherwise the patched manifest. The entry goes into the first
/// unconditional `<ItemGroup>`; a new group is added when there is none.
/// Line endings are preserved.
pub fn ensure_referenced(
    content: &str,
    file_name: &str,
    sdk_style: bool,
) -> HoistResult<Option<String>> {
    if content.contains(file_name) {
        return Ok(None);
    }

    let cr = if content.contains("\r\n") { "\r" } else { "" };
    let entry = reference_entry(file_name, sdk_style);
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let unit = indent_unit(&lines);

    if let Some(index) = lines.iter().position(|l| is_item_group_open(l)) {
        let tag_indent = leading_whitespace(&lines[index]).to_string();
        let child_indent = lines
            .get(index + 1)
            .map(|next| next.trim_end_matches('\r'))
            .filter(|next| !next.trim().is_empty() && !next.trim().starts_with("</ItemGroup"))
            .map(|next| leading_whitespace(next).to_string())
            .unwrap_or_else(|| format!("{}{}", tag_indent, unit));

        lines.insert(index + 1, format!("{}{}{}", child_indent, entry, cr));
        return Ok(Some(lines.join("\n")));
    }

    let Some(index) = lines.iter().rposition(|l| l.contains("</Project>")) else {
        return Err(HoistError::manifest(
            "No ItemGroup and no closing </Project> tag found",
        ));
    };

    let closing_line = lines.remove(index);
    let split_at = closing_line.rfind("</Project>").unwrap_or(0);
    let (before, closing) = closing_line.split_at(split_at);
    let project_indent = leading_whitespace(before).to_string();

    let mut replacement = Vec::new();
    if !before.trim().is_empty() {
        replacement.push(format!("{}{}", before.trim_end(), cr));
    }
    replacement.push(format!("{}{}<ItemGroup>{}", project_indent, unit, cr));
    replacement.push(format!("{}{}{}{}{}", project_indent, unit, unit, entry, cr));
    replacement.push(format!("{}{}</ItemGroup>{}", project_indent, unit, cr));
    replacement.push(format!("{}{}", project_indent, closing));

    lines.splice(index..index, replacement);
    Ok(Some(lines.join("\n")))
}

fn is_item_group_open(line: &str) -> bool {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix("<ItemGroup") else {
        return false;
    };
    let opens = rest.starts_with('>') || rest.starts_with(char::is_whitespace);
    // A conditional group would hide the file from other configurations
    opens
        && !rest.contains("Condition")
        && !trimmed.ends_with("/>")
        && !trimmed.contains("</ItemGroup>")
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

// First indentation seen in the file, two spaces if the file is flat
fn indent_unit(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| leading_whitespace(l.trim_end_matches('\r')))
        .find(|ws| !ws.is_empty())
        .map(|ws| {
            if ws.starts_with('\t') {
                "\t".to_string()
            } else {
                ws.to_string()
            }
        })
        .unwrap_or_else(|| "  ".to_string())
}
