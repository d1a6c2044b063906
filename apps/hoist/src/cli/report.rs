//! Final run report and exit code mapping

use console::style;
use hoist_foundation::ErrorReport;
use hoist_services::{ProjectOutcome, SolutionReport};
use serde::Serialize;
use std::path::PathBuf;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_DECLINED: i32 = 2;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunReport {
    Project {
        project: PathBuf,
        result: ProjectOutcome,
    },
    Solution(SolutionReport),
    Error(ErrorReport),
}

impl RunReport {
    /// 0 for success or a no-op, 1 for any rollback or failure, 2 when the
    /// user declined and nothing failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunReport::Project { result, .. } => outcome_exit_code(result),
            RunReport::Solution(report) => {
                if !report.is_success() {
                    EXIT_FAILURE
                } else if report.declined() > 0 {
                    EXIT_DECLINED
                } else {
                    EXIT_SUCCESS
                }
            }
            RunReport::Error(_) => EXIT_FAILURE,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_pretty(&self) -> String {
        match self {
            RunReport::Project { project, result } => {
                format!("{} {}", status_marker(result), describe(project, result))
            }
            RunReport::Solution(report) => {
                let mut lines = vec![style(report.solution.display().to_string()).bold().to_string()];
                for project in &report.projects {
                    let line = match (&project.outcome, &project.error) {
                        (Some(outcome), _) => format!(
                            "  {} {}",
                            status_marker(outcome),
                            describe(&project.manifest, outcome)
                        ),
                        (None, Some(error)) => format!(
                            "  {} {}: {}",
                            style("✗").red(),
                            project.manifest.display(),
                            error.message
                        ),
                        (None, None) => format!("  ? {}", project.manifest.display()),
                    };
                    lines.push(line);
                }
                lines.push(format!(
                    "{} committed, {} unchanged, {} rolled back, {} failed",
                    report.committed(),
                    report.unchanged(),
                    report.rolled_back(),
                    report.failed()
                ));
                lines.join("\n")
            }
            RunReport::Error(error) => {
                format!("{} [{}] {}", style("✗").red(), error.code, error.message)
            }
        }
    }
}

fn outcome_exit_code(outcome: &ProjectOutcome) -> i32 {
    match outcome {
        ProjectOutcome::RolledBack { .. } => EXIT_FAILURE,
        o if o.is_declined() => EXIT_DECLINED,
        _ => EXIT_SUCCESS,
    }
}

fn status_marker(outcome: &ProjectOutcome) -> String {
    match outcome {
        ProjectOutcome::Committed { .. } => style("✓").green().to_string(),
        ProjectOutcome::RolledBack { .. } => style("✗").red().to_string(),
        ProjectOutcome::ConflictDeclined | ProjectOutcome::PreviewDeclined => {
            style("-").yellow().to_string()
        }
        ProjectOutcome::NothingToMove | ProjectOutcome::DryRun { .. } => {
            style("·").dim().to_string()
        }
    }
}

fn describe(project: &std::path::Path, outcome: &ProjectOutcome) -> String {
    let name = project.display();
    match outcome {
        ProjectOutcome::NothingToMove => format!("{}: nothing to move", name),
        ProjectOutcome::ConflictDeclined => format!("{}: cancelled at conflict check", name),
        ProjectOutcome::PreviewDeclined => format!("{}: cancelled at preview", name),
        ProjectOutcome::DryRun {
            moved_imports,
            new_entries,
            files,
        } => format!(
            "{}: dry run, {} imports from {} files ({} new entries)",
            name, moved_imports, files, new_entries
        ),
        ProjectOutcome::Committed {
            moved_imports,
            new_entries,
            files_rewritten,
            manifest_patched,
        } => format!(
            "{}: moved {} imports from {} files ({} new entries{})",
            name,
            moved_imports,
            files_rewritten,
            new_entries,
            if *manifest_patched { ", manifest updated" } else { "" }
        ),
        ProjectOutcome::RolledBack { reason } => format!("{}: rolled back ({})", name, reason),
    }
}
