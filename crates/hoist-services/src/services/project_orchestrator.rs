//! Project orchestrator
//!
//! Moves the using directives of one project into its consolidated file:
//!
//! ```text
//! Scanning -> ConflictCheck -> Preview -> Backing-up -> Applying -> Validating
//!                                                            |            |
//!                                                            +-> RolledBack <-+
//!                                                                     Committed
//! ```
//!
//! Declining at ConflictCheck or Preview is the only cancellation point and
//! happens before any write. Once Applying starts, the run ends either
//! Committed or RolledBack. Each terminal outcome sends exactly one
//! notification.

use super::filesystem::FileSystem;
use super::interaction::{options, ConsolidationPreview, FilePreview, UserInteraction};
use super::manifest_patcher::patch_manifest;
use super::post_apply_validator::BuildValidator;
use super::project_locator::find_project_manifest;
use super::transaction::Transaction;
use super::walker::{ends_with_ignore_case, walk, WalkOptions};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use hoist_config::AppConfig;
use hoist_foundation::{HoistError, HoistResult};
use hoist_lang_csharp::conflicts;
use hoist_lang_csharp::{extract, Extraction, GlobalUsingsFile, UsingDirective};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn, Instrument, Span};

/// Which source files of a project a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every source file found by walking the project directory.
    Project,
    /// Only these files (single-file entry).
    Files(Vec<PathBuf>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationTarget {
    pub project_dir: PathBuf,
    /// Looked up in `project_dir` when absent.
    pub manifest: Option<PathBuf>,
    pub scope: Scope,
}

impl ConsolidationTarget {
    pub fn project(project_dir: impl Into<PathBuf>, manifest: Option<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            manifest,
            scope: Scope::Project,
        }
    }

    pub fn files(
        project_dir: impl Into<PathBuf>,
        manifest: Option<PathBuf>,
        files: Vec<PathBuf>,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            manifest,
            scope: Scope::Files(files),
        }
    }

    /// Manifest stem, falling back to the directory name.
    pub fn display_name(&self) -> String {
        self.manifest
            .as_deref()
            .and_then(Path::file_stem)
            .or_else(|| self.project_dir.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.project_dir.display().to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Show the preview and stop before any write.
    pub dry_run: bool,
}

/// Terminal state of one project run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProjectOutcome {
    NothingToMove,
    ConflictDeclined,
    PreviewDeclined,
    DryRun {
        moved_imports: usize,
        new_entries: usize,
        files: usize,
    },
    Committed {
        /// Distinct directives removed from source files.
        moved_imports: usize,
        /// Entries the consolidated file gained.
        new_entries: usize,
        files_rewritten: usize,
        manifest_patched: bool,
    },
    RolledBack {
        reason: String,
    },
}

impl ProjectOutcome {
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, ProjectOutcome::RolledBack { .. })
    }

    pub fn is_declined(&self) -> bool {
        matches!(
            self,
            ProjectOutcome::ConflictDeclined | ProjectOutcome::PreviewDeclined
        )
    }
}

struct ScannedFile {
    path: PathBuf,
    original: String,
    extraction: Extraction,
}

pub struct ProjectOrchestrator {
    fs: Arc<dyn FileSystem>,
    ui: Arc<dyn UserInteraction>,
    config: AppConfig,
    validator: BuildValidator,
    options: RunOptions,
}

impl ProjectOrchestrator {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        ui: Arc<dyn UserInteraction>,
        config: AppConfig,
        validator: BuildValidator,
    ) -> Self {
        Self {
            fs,
            ui,
            config,
            validator,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub(crate) fn ui(&self) -> &dyn UserInteraction {
        self.ui.as_ref()
    }

    /// Run one project to a terminal outcome inside `span`.
    ///
    /// Errors are only returned for failures before Applying (for example an
    /// unreadable consolidated file); anything later is rolled back and
    /// reported as [`ProjectOutcome::RolledBack`].
    pub async fn run(&self, target: &ConsolidationTarget, span: Span) -> HoistResult<ProjectOutcome> {
        self.run_inner(target).instrument(span).await
    }

    async fn run_inner(&self, target: &ConsolidationTarget) -> HoistResult<ProjectOutcome> {
        let cfg = &self.config.consolidation;
        let name = target.display_name();

        // Scanning
        let files = self.discover(target).await?;
        info!(project = %name, files_count = files.len(), "Scanning project");
        let (scanned, imports) = self.scan(files).await?;

        if imports.is_empty() {
            self.ui.info(&format!("{}: nothing to move", name));
            return Ok(ProjectOutcome::NothingToMove);
        }

        let consolidated_path = target.project_dir.join(&cfg.consolidated_file_name);
        let existing = if self.fs.exists(&consolidated_path).await {
            self.fs.read_to_string(&consolidated_path).await?
        } else {
            String::new()
        };

        let mut merged_file = GlobalUsingsFile::parse(&existing);
        let new_entries = imports.iter().filter(|d| merged_file.insert(d)).count();
        let merged = merged_file.render(&cfg.priority_prefixes);

        debug!(
            project = %name,
            moved_imports = imports.len(),
            new_entries,
            files_count = scanned.len(),
            "Scan complete"
        );

        // ConflictCheck
        if cfg.conflict_check {
            let found = conflicts::detect(merged_file.entries());
            if !found.is_empty() {
                let listing = found
                    .iter()
                    .map(|c| format!("  - {}", c))
                    .collect::<Vec<_>>()
                    .join("\n");
                self.ui.warn(&format!(
                    "{}: conflicting using directives\n{}",
                    name, listing
                ));

                if !self.options.dry_run {
                    let choice = self.ui.choose(
                        "Continue with consolidation?",
                        &options(&["Continue", "Cancel"]),
                    );
                    if choice != Some(0) {
                        self.ui.info(&format!("{}: consolidation cancelled", name));
                        return Ok(ProjectOutcome::ConflictDeclined);
                    }
                }
            }
        }

        // Preview
        let preview = ConsolidationPreview {
            project_name: name.clone(),
            project_dir: target.project_dir.clone(),
            consolidated_path: consolidated_path.clone(),
            files: scanned
                .iter()
                .map(|f| FilePreview {
                    path: f.path.clone(),
                    import_count: f.extraction.imports.len(),
                })
                .collect(),
            moved_imports: imports.len(),
            new_entries,
            existing_content: existing,
            new_content: merged.clone(),
        };

        if self.options.dry_run {
            self.ui.show_preview(&preview);
            self.ui.info(&format!(
                "{}: dry run, {} imports from {} files would move to {}",
                name,
                imports.len(),
                scanned.len(),
                cfg.consolidated_file_name
            ));
            return Ok(ProjectOutcome::DryRun {
                moved_imports: imports.len(),
                new_entries,
                files: scanned.len(),
            });
        }

        if cfg.preview {
            self.ui.show_preview(&preview);
            let choice = self
                .ui
                .choose("Apply these changes?", &options(&["Apply", "Cancel"]));
            if choice != Some(0) {
                self.ui.info(&format!("{}: consolidation cancelled", name));
                return Ok(ProjectOutcome::PreviewDeclined);
            }
        }

        let manifest = match &target.manifest {
            Some(path) => Some(path.clone()),
            None => {
                find_project_manifest(
                    self.fs.as_ref(),
                    &target.project_dir,
                    &cfg.project_manifest_suffix,
                )
                .await
            }
        };

        // Backing-up, Applying, Validating
        let mut tx = Transaction::new();
        for file in &scanned {
            tx.record(file.path.clone(), Some(file.original.clone()));
        }

        let applied = self
            .apply(
                &mut tx,
                &scanned,
                &consolidated_path,
                &merged,
                manifest.as_deref(),
                &target.project_dir,
            )
            .await;

        match applied {
            Ok(manifest_patched) => {
                tx.commit();
                self.ui.info(&format!(
                    "{}: moved {} imports from {} files into {}",
                    name,
                    imports.len(),
                    scanned.len(),
                    cfg.consolidated_file_name
                ));
                Ok(ProjectOutcome::Committed {
                    moved_imports: imports.len(),
                    new_entries,
                    files_rewritten: scanned.len(),
                    manifest_patched,
                })
            }
            Err(e) => {
                error!(project = %name, error = %e, "Consolidation failed, rolling back");
                let report = tx.rollback(self.fs.as_ref()).await;
                let mut message = format!("{}: {}; all changes were rolled back", name, e);
                if !report.is_clean() {
                    message.push_str(&format!(
                        " ({} files could not be restored: {})",
                        report.errors.len(),
                        report.errors.join("; ")
                    ));
                }
                self.ui.error(&message);
                Ok(ProjectOutcome::RolledBack {
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn discover(&self, target: &ConsolidationTarget) -> HoistResult<Vec<PathBuf>> {
        let cfg = &self.config.consolidation;
        let options = WalkOptions::from_config(cfg);

        match &target.scope {
            Scope::Project => {
                let root = target.project_dir.clone();
                let skip = cfg.skip_dirs.clone();
                tokio::task::spawn_blocking(move || walk(&root, &skip, &options))
                    .await
                    .map_err(|e| HoistError::internal(format!("Directory walk failed: {}", e)))
            }
            Scope::Files(files) => Ok(files
                .iter()
                .filter(|path| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| {
                            ends_with_ignore_case(n, &options.source_suffix)
                                && !n.eq_ignore_ascii_case(&options.excluded_file_name)
                        })
                })
                .cloned()
                .collect()),
        }
    }

    /// Read and extract files concurrently. This loop is the only writer of
    /// the accumulated import set. Unreadable files are skipped; any other
    /// read failure stops the run before anything is written.
    async fn scan(
        &self,
        files: Vec<PathBuf>,
    ) -> HoistResult<(Vec<ScannedFile>, BTreeSet<UsingDirective>)> {
        let concurrency = self.config.consolidation.max_concurrency.max(1);
        let mut results = stream::iter(files)
            .map(|path| {
                let fs = Arc::clone(&self.fs);
                async move {
                    let read = fs.read_to_string(&path).await.map(|original| {
                        let extraction = extract(&original);
                        (original, extraction)
                    });
                    (path, read)
                }
            })
            .buffer_unordered(concurrency);

        let mut scanned = Vec::new();
        let mut imports = BTreeSet::new();
        while let Some((path, read)) = results.next().await {
            match read {
                Ok((original, extraction)) => {
                    if extraction.imports.is_empty() {
                        continue;
                    }
                    imports.extend(extraction.imports.iter().cloned());
                    scanned.push(ScannedFile {
                        path,
                        original,
                        extraction,
                    });
                }
                Err(e) if !e.is_input_error() => {
                    error!(file_path = %path.display(), error = %e, "Scanning failed");
                    return Err(e);
                }
                Err(e) => {
                    warn!(file_path = %path.display(), error = %e, "Skipping unreadable file");
                    self.ui
                        .warn(&format!("Skipped unreadable file {}: {}", path.display(), e));
                }
            }
        }

        scanned.sort_by(|a, b| a.path.cmp(&b.path));
        Ok((scanned, imports))
    }

    /// Snapshot, then write files, consolidated file and manifest in that
    /// order, then validate. Returns whether the manifest was patched.
    async fn apply(
        &self,
        tx: &mut Transaction,
        scanned: &[ScannedFile],
        consolidated_path: &Path,
        merged: &str,
        manifest: Option<&Path>,
        project_dir: &Path,
    ) -> HoistResult<bool> {
        let fs = self.fs.as_ref();
        tx.snapshot(fs, consolidated_path).await?;
        if let Some(manifest) = manifest {
            tx.snapshot(fs, manifest).await?;
        }

        let writes = scanned.iter().map(|file| async move {
            fs.write(&file.path, &file.extraction.remainder)
                .await
                .map_err(|e| (file.path.as_path(), e))
        });
        let mut first_failure = None;
        for result in join_all(writes).await {
            if let Err((path, e)) = result {
                error!(file_path = %path.display(), error = %e, "Failed to rewrite source file");
                first_failure.get_or_insert(e);
            }
        }
        if let Some(e) = first_failure {
            return Err(e);
        }

        fs.write(consolidated_path, merged).await?;
        debug!(file_path = %consolidated_path.display(), "Wrote consolidated file");

        let manifest_patched = match manifest {
            Some(manifest) => {
                match patch_manifest(fs, manifest, &self.config.consolidation.consolidated_file_name)
                    .await
                {
                    Ok(patched) => patched,
                    Err(e) => {
                        warn!(
                            manifest = %manifest.display(),
                            error = %e,
                            "Could not patch project manifest, continuing"
                        );
                        false
                    }
                }
            }
            None => {
                warn!(project_dir = %project_dir.display(), "No project manifest found, skipping reference");
                false
            }
        };

        if self.config.validation.enabled {
            let result = self.validator.run(&self.config.validation, project_dir).await?;
            if !result.passed {
                return Err(HoistError::validation(format!(
                    "`{}` failed with exit code {}\n{}",
                    result.command,
                    result.exit_code,
                    result.output_tail(20)
                )));
            }
            info!(duration_ms = result.duration_ms, "Build validation passed");
        }

        Ok(manifest_patched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filesystem::LocalFileSystem;
    use crate::services::interaction::MockUserInteraction;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const MANIFEST: &str = "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    <TargetFramework>net8.0</TargetFramework>\n  </PropertyGroup>\n</Project>\n";
    const PROGRAM: &str = "using System;\nusing MyApp.Services;\n\nnamespace MyApp;\n\nclass Program {}\n";
    const GREETER: &str = "using System.Linq;\nusing MyApp.Services;\nnamespace MyApp.Services\n{\n    class Greeter {}\n}\n";

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    fn sample_project() -> TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "App.csproj", MANIFEST);
        write(root, "Program.cs", PROGRAM);
        write(root, "Services/Greeter.cs", GREETER);
        write(root, "bin/Debug/Generated.cs", "using Ignored;\nclass G {}\n");
        dir
    }

    fn no_preview() -> AppConfig {
        let mut config = AppConfig::default();
        config.consolidation.preview = false;
        config
    }

    fn orchestrator(ui: MockUserInteraction, config: AppConfig) -> ProjectOrchestrator {
        ProjectOrchestrator::new(
            Arc::new(LocalFileSystem),
            Arc::new(ui),
            config,
            BuildValidator::new(),
        )
    }

    #[tokio::test]
    async fn test_commits_and_patches_manifest() {
        let dir = sample_project();
        let root = dir.path();

        let mut ui = MockUserInteraction::new();
        ui.expect_info()
            .withf(|m| m.contains("moved 3 imports from 2 files"))
            .times(1)
            .return_const(());

        let outcome = orchestrator(ui, no_preview())
            .run(&ConsolidationTarget::project(root, None), Span::none())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ProjectOutcome::Committed {
                moved_imports: 3,
                new_entries: 3,
                files_rewritten: 2,
                manifest_patched: true,
            }
        );
        assert_eq!(read(root, "Program.cs"), "namespace MyApp;\n\nclass Program {}\n");
        assert_eq!(
            read(root, "Services/Greeter.cs"),
            "namespace MyApp.Services\n{\n    class Greeter {}\n}\n"
        );
        assert_eq!(
            read(root, "GlobalUsings.cs"),
            "global using System;\nglobal using System.Linq;\n\nglobal using MyApp.Services;\n"
        );
        assert!(read(root, "App.csproj").contains("<Compile Update=\"GlobalUsings.cs\" />"));
        assert_eq!(read(root, "bin/Debug/Generated.cs"), "using Ignored;\nclass G {}\n");
    }

    #[tokio::test]
    async fn test_nothing_to_move() {
        let dir = tempdir().unwrap();
        write(dir.path(), "A.cs", "namespace A;\nclass A {}\n");

        let mut ui = MockUserInteraction::new();
        ui.expect_info()
            .withf(|m| m.ends_with("nothing to move"))
            .times(1)
            .return_const(());

        let outcome = orchestrator(ui, AppConfig::default())
            .run(&ConsolidationTarget::project(dir.path(), None), Span::none())
            .await
            .unwrap();

        assert_eq!(outcome, ProjectOutcome::NothingToMove);
        assert!(!dir.path().join("GlobalUsings.cs").exists());
    }

    #[tokio::test]
    async fn test_preview_declined_touches_nothing() {
        let dir = sample_project();
        let root = dir.path();

        let mut ui = MockUserInteraction::new();
        ui.expect_show_preview()
            .withf(|p| p.file_count() == 2 && p.new_content.starts_with("global using System;"))
            .times(1)
            .return_const(());
        ui.expect_choose()
            .withf(|_, options| options == ["Apply", "Cancel"])
            .times(1)
            .return_const(Some(1usize));
        ui.expect_info()
            .withf(|m| m.contains("cancelled"))
            .times(1)
            .return_const(());

        let outcome = orchestrator(ui, AppConfig::default())
            .run(&ConsolidationTarget::project(root, None), Span::none())
            .await
            .unwrap();

        assert_eq!(outcome, ProjectOutcome::PreviewDeclined);
        assert_eq!(read(root, "Program.cs"), PROGRAM);
        assert_eq!(read(root, "App.csproj"), MANIFEST);
        assert!(!root.join("GlobalUsings.cs").exists());
    }

    #[tokio::test]
    async fn test_dismissed_preview_counts_as_decline() {
        let dir = sample_project();

        let mut ui = MockUserInteraction::new();
        ui.expect_show_preview().times(1).return_const(());
        ui.expect_choose().times(1).return_const(None::<usize>);
        ui.expect_info().times(1).return_const(());

        let outcome = orchestrator(ui, AppConfig::default())
            .run(&ConsolidationTarget::project(dir.path(), None), Span::none())
            .await
            .unwrap();
        assert_eq!(outcome, ProjectOutcome::PreviewDeclined);
    }

    #[tokio::test]
    async fn test_conflict_declined() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "A.cs", "using Json = Newtonsoft.Json;\nclass A {}\n");
        write(root, "B.cs", "using Json = System.Text.Json;\nclass B {}\n");

        let mut ui = MockUserInteraction::new();
        ui.expect_warn()
            .withf(|m| m.contains("alias 'Json'"))
            .times(1)
            .return_const(());
        ui.expect_choose()
            .withf(|_, options| options == ["Continue", "Cancel"])
            .times(1)
            .return_const(Some(1usize));
        ui.expect_info().times(1).return_const(());

        let outcome = orchestrator(ui, AppConfig::default())
            .run(&ConsolidationTarget::project(root, None), Span::none())
            .await
            .unwrap();

        assert_eq!(outcome, ProjectOutcome::ConflictDeclined);
        assert_eq!(read(root, "A.cs"), "using Json = Newtonsoft.Json;\nclass A {}\n");
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = sample_project();
        let root = dir.path();

        let mut ui = MockUserInteraction::new();
        ui.expect_show_preview().times(1).return_const(());
        ui.expect_info()
            .withf(|m| m.contains("dry run"))
            .times(1)
            .return_const(());

        let outcome = orchestrator(ui, AppConfig::default())
            .with_options(RunOptions { dry_run: true })
            .run(&ConsolidationTarget::project(root, None), Span::none())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ProjectOutcome::DryRun {
                moved_imports: 3,
                new_entries: 3,
                files: 2
            }
        );
        assert_eq!(read(root, "Program.cs"), PROGRAM);
        assert!(!root.join("GlobalUsings.cs").exists());
    }

    #[tokio::test]
    async fn test_files_scope_only_touches_given_files() {
        let dir = sample_project();
        let root = dir.path();

        let mut ui = MockUserInteraction::new();
        ui.expect_info().times(1).return_const(());

        let target = ConsolidationTarget::files(root, None, vec![root.join("Program.cs")]);
        let outcome = orchestrator(ui, no_preview())
            .run(&target, Span::none())
            .await
            .unwrap();

        assert!(matches!(outcome, ProjectOutcome::Committed { files_rewritten: 1, .. }));
        assert_eq!(read(root, "Services/Greeter.cs"), GREETER);
        assert_eq!(
            read(root, "GlobalUsings.cs"),
            "global using System;\n\nglobal using MyApp.Services;\n"
        );
    }

    #[tokio::test]
    async fn test_existing_entries_are_not_counted_as_new() {
        let dir = sample_project();
        let root = dir.path();
        write(root, "GlobalUsings.cs", "global using System;\n");

        let mut ui = MockUserInteraction::new();
        ui.expect_info().times(1).return_const(());

        let outcome = orchestrator(ui, no_preview())
            .run(&ConsolidationTarget::project(root, None), Span::none())
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            ProjectOutcome::Committed { moved_imports: 3, new_entries: 2, .. }
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_validation_failure_rolls_back() {
        let dir = sample_project();
        let root = dir.path();

        let mut config = no_preview();
        config.validation.enabled = true;
        config.validation.command = "echo 'error CS0246: missing type'".to_string();
        config.validation.timeout_seconds = 5;

        let mut ui = MockUserInteraction::new();
        ui.expect_error()
            .withf(|m| m.contains("rolled back"))
            .times(1)
            .return_const(());

        let outcome = orchestrator(ui, config)
            .run(&ConsolidationTarget::project(root, None), Span::none())
            .await
            .unwrap();

        assert!(outcome.is_rolled_back());
        assert_eq!(read(root, "Program.cs"), PROGRAM);
        assert_eq!(read(root, "Services/Greeter.cs"), GREETER);
        assert_eq!(read(root, "App.csproj"), MANIFEST);
        assert!(!root.join("GlobalUsings.cs").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_validation_success_commits() {
        let dir = sample_project();

        let mut config = no_preview();
        config.validation.enabled = true;
        config.validation.command = "echo 'Build succeeded.'".to_string();

        let mut ui = MockUserInteraction::new();
        ui.expect_info().times(1).return_const(());

        let outcome = orchestrator(ui, config)
            .run(&ConsolidationTarget::project(dir.path(), None), Span::none())
            .await
            .unwrap();
        assert!(matches!(outcome, ProjectOutcome::Committed { .. }));
    }

    #[test]
    fn test_display_name() {
        let target = ConsolidationTarget::project("/src/App", Some(PathBuf::from("/src/App/Billing.csproj")));
        assert_eq!(target.display_name(), "Billing");
        assert_eq!(ConsolidationTarget::project("/src/App", None).display_name(), "App");
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let value = serde_json::to_value(ProjectOutcome::RolledBack {
            reason: "build failed".to_string(),
        })
        .unwrap();
        assert_eq!(value["outcome"], "rolled_back");
        assert_eq!(value["reason"], "build failed");

        let value = serde_json::to_value(ProjectOutcome::NothingToMove).unwrap();
        assert_eq!(value, serde_json::json!({ "outcome": "nothing_to_move" }));
    }
}
