//! C# support for hoist
//!
//! Pure, I/O-free logic for moving `using` directives into a project-wide
//! `GlobalUsings.cs`:
//! - [`extractor`]: split a source file into its using directives and the rest
//! - [`global_usings`]: merge directives into the consolidated declarations file
//! - [`conflicts`]: advisory checks on the merged directive set
//! - [`manifest`]: `.csproj` inspection and the reference patcher
//! - [`workspace_support`]: `.sln` / `.slnx` member readers

pub mod conflicts;
pub mod extractor;
pub mod global_usings;
pub mod manifest;
pub mod using_directive;
pub mod workspace_support;

pub use conflicts::{detect as detect_conflicts, Conflict};
pub use extractor::{extract, Extraction};
pub use global_usings::{merge, parse_entries, GlobalUsingsFile};
pub use manifest::{analyze_manifest_content, ensure_referenced, ProjectInfo};
pub use using_directive::{UsingDirective, UsingKind};
pub use workspace_support::{is_aggregate_manifest, reader_for, ManifestReader, SlnReader, SlnxReader};
