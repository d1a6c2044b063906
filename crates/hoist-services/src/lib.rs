pub mod services;

// Re-export commonly used types at crate root for convenience
pub use services::{
    find_owning_project_dir, find_project_manifest, patch_manifest, resolve_manifest_members,
    walk, BuildValidator, ConsolidationPreview, ConsolidationTarget, FileSystem, LocalFileSystem,
    ProjectOrchestrator, ProjectOutcome, ProjectReport, RunOptions, Scope, SolutionOrchestrator,
    SolutionReport, Transaction, UserInteraction, WalkOptions,
};
