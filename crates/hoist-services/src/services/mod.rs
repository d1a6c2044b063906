//! Services for reading, rewriting and validating C# projects

pub mod filesystem;
pub mod interaction;
pub mod manifest_patcher;
pub mod post_apply_validator;
pub mod project_locator;
pub mod project_orchestrator;
pub mod solution_orchestrator;
pub mod transaction;
pub mod walker;

pub use filesystem::{FileSystem, LocalFileSystem};
pub use interaction::{ConsolidationPreview, FilePreview, UserInteraction};
pub use manifest_patcher::patch_manifest;
pub use post_apply_validator::BuildValidator;
pub use project_locator::{find_owning_project_dir, find_project_manifest};
pub use project_orchestrator::{
    ConsolidationTarget, ProjectOrchestrator, ProjectOutcome, RunOptions, Scope,
};
pub use solution_orchestrator::{
    resolve_manifest_members, ProjectReport, SolutionOrchestrator, SolutionReport,
};
pub use transaction::{RollbackReport, Transaction};
pub use walker::{walk, WalkOptions};
