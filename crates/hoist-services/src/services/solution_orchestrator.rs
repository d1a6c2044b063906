//! Solution orchestrator
//!
//! Runs the project orchestrator over every project a solution references.
//! Projects are independent transactions: a rollback in one never touches
//! another, and a failed project does not stop the remaining ones.

use super::filesystem::FileSystem;
use super::project_orchestrator::{ConsolidationTarget, ProjectOrchestrator, ProjectOutcome};
use hoist_foundation::{ErrorReport, HoistError, HoistResult};
use hoist_lang_csharp::reader_for;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn, Instrument, Span};

/// Project manifests referenced by a `.sln` / `.slnx` that exist on disk.
///
/// Paths are resolved against the solution's directory; missing ones are
/// dropped because solutions may reference projects outside the checkout.
pub async fn resolve_manifest_members(
    fs: &dyn FileSystem,
    solution_path: &Path,
    manifest_suffix: &str,
) -> HoistResult<Vec<PathBuf>> {
    let reader = reader_for(solution_path, manifest_suffix).ok_or_else(|| {
        HoistError::not_supported(format!(
            "{} is not a .sln or .slnx file",
            solution_path.display()
        ))
    })?;

    let content = fs.read_to_string(solution_path).await?;
    let base_dir = solution_path.parent().unwrap_or_else(|| Path::new("."));

    let mut seen = HashSet::new();
    let mut members = Vec::new();
    for raw in reader.member_paths(&content)? {
        let resolved = base_dir.join(raw.replace('\\', "/"));
        if !fs.exists(&resolved).await {
            debug!(
                member = %raw,
                resolved = %resolved.display(),
                "Dropping solution member that does not exist"
            );
            continue;
        }
        if seen.insert(resolved.clone()) {
            members.push(resolved);
        }
    }

    debug!(
        solution = %solution_path.display(),
        format = reader.format_name(),
        count = members.len(),
        "Resolved solution members"
    );
    Ok(members)
}

/// Outcome of one member project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub manifest: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ProjectOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl ProjectReport {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
            || self
                .outcome
                .as_ref()
                .is_some_and(ProjectOutcome::is_rolled_back)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionReport {
    pub solution: PathBuf,
    pub projects: Vec<ProjectReport>,
}

impl SolutionReport {
    fn count(&self, pred: impl Fn(&ProjectOutcome) -> bool) -> usize {
        self.projects
            .iter()
            .filter(|p| p.outcome.as_ref().is_some_and(&pred))
            .count()
    }

    pub fn committed(&self) -> usize {
        self.count(|o| matches!(o, ProjectOutcome::Committed { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| !matches!(o, ProjectOutcome::Committed { .. } | ProjectOutcome::RolledBack { .. }))
    }

    pub fn rolled_back(&self) -> usize {
        self.count(ProjectOutcome::is_rolled_back)
    }

    pub fn failed(&self) -> usize {
        self.projects.iter().filter(|p| p.error.is_some()).count()
    }

    pub fn declined(&self) -> usize {
        self.count(ProjectOutcome::is_declined)
    }

    /// True only when no project rolled back or failed.
    pub fn is_success(&self) -> bool {
        self.projects.iter().all(|p| !p.is_failure())
    }
}

pub struct SolutionOrchestrator {
    project: ProjectOrchestrator,
}

impl SolutionOrchestrator {
    pub fn new(project: ProjectOrchestrator) -> Self {
        Self { project }
    }

    pub async fn run(&self, solution_path: &Path, span: Span) -> HoistResult<SolutionReport> {
        self.run_inner(solution_path).instrument(span).await
    }

    async fn run_inner(&self, solution_path: &Path) -> HoistResult<SolutionReport> {
        let ui = self.project.ui();
        let suffix = &self.project.config().consolidation.project_manifest_suffix;
        let members = resolve_manifest_members(self.project.fs(), solution_path, suffix).await?;

        let mut report = SolutionReport {
            solution: solution_path.to_path_buf(),
            projects: Vec::new(),
        };

        if members.is_empty() {
            ui.warn(&format!("No projects found in {}", solution_path.display()));
            return Ok(report);
        }

        info!(projects_count = members.len(), "Consolidating solution");

        for manifest in members {
            let project_dir = manifest
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let target = ConsolidationTarget::project(project_dir, Some(manifest.clone()));
            let span = info_span!("project", manifest = %manifest.display());

            let entry = match self.project.run(&target, span).await {
                Ok(outcome) => ProjectReport {
                    manifest,
                    outcome: Some(outcome),
                    error: None,
                },
                Err(e) => {
                    warn!(manifest = %manifest.display(), error = %e, "Project failed, continuing with the next one");
                    ui.error(&format!("{}: {}", target.display_name(), e));
                    ProjectReport {
                        manifest,
                        outcome: None,
                        error: Some(ErrorReport::from(&e)),
                    }
                }
            };
            report.projects.push(entry);
        }

        let summary = format!(
            "{}: {} committed, {} unchanged, {} rolled back, {} failed",
            solution_path.display(),
            report.committed(),
            report.unchanged(),
            report.rolled_back(),
            report.failed()
        );
        if report.is_success() {
            ui.info(&summary);
        } else {
            ui.warn(&summary);
        }

        Ok(report)
    }
}
