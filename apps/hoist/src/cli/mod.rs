//! CLI command handling for hoist

mod interactive;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hoist_config::{logging, AppConfig, ConsolidationConfig};
use hoist_foundation::{ErrorReport, HoistError, HoistResult};
use hoist_lang_csharp::is_aggregate_manifest;
use hoist_services::{
    find_owning_project_dir, BuildValidator, ConsolidationTarget, LocalFileSystem,
    ProjectOrchestrator, RunOptions, SolutionOrchestrator, UserInteraction,
};
use interactive::TerminalInteraction;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

use report::RunReport;
pub use report::EXIT_FAILURE;

/// The main CLI struct.
#[derive(Parser, Debug)]
#[command(name = "hoist")]
#[command(about = "Move per-file C# using directives into one global usings file per project")]
#[command(version)]
pub struct Cli {
    /// A .cs file, a .csproj or project directory, or a .sln / .slnx solution
    pub path: PathBuf,

    /// Answer every confirmation with its first option
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Apply without showing the preview
    #[arg(long)]
    pub no_preview: bool,

    /// Show the preview and stop before writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Build the project after applying and roll back if the build fails
    #[arg(long)]
    pub validate: bool,

    /// Build command used for validation
    #[arg(long, value_name = "CMD")]
    pub validate_command: Option<String>,

    /// Build timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra directory name to skip while scanning (repeatable)
    #[arg(long = "skip-dir", value_name = "NAME")]
    pub skip_dirs: Vec<String>,

    /// Final report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl Cli {
    /// Flags win over config files and environment.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if self.no_preview {
            config.consolidation.preview = false;
        }
        if self.validate {
            config.validation.enabled = true;
        }
        if let Some(command) = &self.validate_command {
            config.validation.command = command.clone();
        }
        if let Some(timeout) = self.timeout {
            config.validation.timeout_seconds = timeout;
        }
        for dir in &self.skip_dirs {
            if !config.consolidation.skip_dirs.contains(dir) {
                config.consolidation.skip_dirs.push(dir.clone());
            }
        }
    }
}

/// Granularity picked from the entry path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    File(PathBuf),
    Project {
        dir: PathBuf,
        manifest: Option<PathBuf>,
    },
    Solution(PathBuf),
}

impl Entry {
    fn detect(path: &Path, config: &ConsolidationConfig) -> HoistResult<Self> {
        if path.is_dir() {
            return Ok(Entry::Project {
                dir: path.to_path_buf(),
                manifest: None,
            });
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if is_aggregate_manifest(path) {
            Ok(Entry::Solution(path.to_path_buf()))
        } else if name.ends_with(&config.project_manifest_suffix.to_ascii_lowercase()) {
            let dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok(Entry::Project {
                dir,
                manifest: Some(path.to_path_buf()),
            })
        } else if name.ends_with(&config.source_suffix.to_ascii_lowercase()) {
            Ok(Entry::File(path.to_path_buf()))
        } else {
            Err(HoistError::not_supported(format!(
                "{} is not a {} file, a {} project, a solution or a directory",
                path.display(),
                config.source_suffix,
                config.project_manifest_suffix
            )))
        }
    }
}

/// Parse arguments, run one consolidation and return the process exit code.
pub async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let base_dir = if cli.path.is_dir() {
        cli.path.clone()
    } else {
        cli.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    };
    let mut config = AppConfig::load_from(&base_dir).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid option")?;

    logging::initialize(&config);
    debug!(?cli, "Parsed command line");

    let report = match execute(&cli, config).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Consolidation could not start");
            if cli.format == OutputFormat::Json {
                print_report(&RunReport::Error(ErrorReport::from(&e)), cli.format)?;
            }
            return Err(e.into());
        }
    };

    print_report(&report, cli.format)?;
    Ok(report.exit_code())
}

async fn execute(cli: &Cli, config: AppConfig) -> HoistResult<RunReport> {
    let path = cli.path.canonicalize().map_err(|e| {
        HoistError::not_found(format!("{} ({})", cli.path.display(), e))
    })?;
    let entry = Entry::detect(&path, &config.consolidation)?;
    info!(entry = ?entry, "Starting consolidation");

    let fs = Arc::new(LocalFileSystem::new());
    let ui: Arc<dyn UserInteraction> = Arc::new(TerminalInteraction::new(cli.yes));
    let suffix = config.consolidation.project_manifest_suffix.clone();
    let orchestrator = ProjectOrchestrator::new(fs.clone(), ui, config, BuildValidator::new())
        .with_options(RunOptions {
            dry_run: cli.dry_run,
        });

    let target_label = path.display().to_string();
    match entry {
        Entry::Solution(solution) => {
            let span = logging::operation_span("solution", &target_label);
            let report = SolutionOrchestrator::new(orchestrator)
                .run(&solution, span)
                .await?;
            Ok(RunReport::Solution(report))
        }
        Entry::Project { dir, manifest } => {
            let target = ConsolidationTarget::project(dir.clone(), manifest);
            let span = logging::operation_span("project", &target_label);
            let outcome = orchestrator.run(&target, span).await?;
            Ok(RunReport::Project {
                project: dir,
                result: outcome,
            })
        }
        Entry::File(file) => {
            let dir = find_owning_project_dir(fs.as_ref(), &file, &suffix)
                .await
                .ok_or_else(|| {
                    HoistError::not_found(format!(
                        "no {} project above {}",
                        suffix,
                        file.display()
                    ))
                })?;
            let target = ConsolidationTarget::files(dir.clone(), None, vec![file]);
            let span = logging::operation_span("file", &target_label);
            let outcome = orchestrator.run(&target, span).await?;
            Ok(RunReport::Project {
                project: dir,
                result: outcome,
            })
        }
    }
}

fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Pretty => println!("{}", report.to_pretty()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parses_every_option() {
        let cli = Cli::try_parse_from([
            "hoist",
            "App.sln",
            "--yes",
            "--no-preview",
            "--validate",
            "--validate-command",
            "dotnet build -c Release",
            "--timeout",
            "60",
            "--skip-dir",
            "Generated",
            "--skip-dir",
            "Migrations",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(cli.yes && cli.no_preview && cli.validate && !cli.dry_run);
        assert_eq!(cli.timeout, Some(60));
        assert_eq!(cli.skip_dirs, vec!["Generated", "Migrations"]);
        assert_eq!(cli.format, OutputFormat::Json);

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert!(!config.consolidation.preview);
        assert!(config.validation.enabled);
        assert_eq!(config.validation.command, "dotnet build -c Release");
        assert_eq!(config.validation.timeout_seconds, 60);
        assert!(config.consolidation.skip_dirs.iter().any(|d| d == "Migrations"));
    }

    #[test]
    fn test_skip_dir_is_not_duplicated() {
        let cli = Cli::try_parse_from(["hoist", ".", "--skip-dir", "obj"]).unwrap();
        let mut config = AppConfig::default();
        let before = config.consolidation.skip_dirs.len();
        cli.apply_overrides(&mut config);
        assert_eq!(config.consolidation.skip_dirs.len(), before);
    }

    #[test]
    fn test_entry_detection() {
        let dir = tempdir().unwrap();
        let cfg = ConsolidationConfig::default();
        let root = dir.path();

        assert_eq!(
            Entry::detect(root, &cfg).unwrap(),
            Entry::Project {
                dir: root.to_path_buf(),
                manifest: None
            }
        );
        assert_eq!(
            Entry::detect(&root.join("Api/Api.csproj"), &cfg).unwrap(),
            Entry::Project {
                dir: root.join("Api"),
                manifest: Some(root.join("Api/Api.csproj"))
            }
        );
        assert_eq!(
            Entry::detect(&root.join("All.SLNX"), &cfg).unwrap(),
            Entry::Solution(root.join("All.SLNX"))
        );
        assert_eq!(
            Entry::detect(&root.join("Api/Program.cs"), &cfg).unwrap(),
            Entry::File(root.join("Api/Program.cs"))
        );
        assert!(matches!(
            Entry::detect(&root.join("README.md"), &cfg),
            Err(HoistError::NotSupported { .. })
        ));
    }
}
