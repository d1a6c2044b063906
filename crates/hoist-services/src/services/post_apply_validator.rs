//! Build validation after a consolidation is applied
//!
//! Runs the configured build command in the project directory. A failure
//! marker in the output, a non-zero exit or a timeout fails validation,
//! which the project orchestrator turns into a rollback.

use hoist_foundation::validation::{ValidationConfig, ValidationResult};
use hoist_foundation::{HoistError, HoistResult};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct BuildValidator;

impl BuildValidator {
    pub fn new() -> Self {
        Self
    }

    /// Run the validation command with `project_dir` as working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the command times out or cannot be spawned.
    pub async fn run(
        &self,
        config: &ValidationConfig,
        project_dir: &Path,
    ) -> HoistResult<ValidationResult> {
        let start = Instant::now();

        debug!(
            command = %config.command,
            working_dir = %project_dir.display(),
            timeout_seconds = config.timeout_seconds,
            "Running validation command"
        );

        #[cfg(unix)]
        let mut cmd = Command::new("sh");
        #[cfg(unix)]
        cmd.arg("-c");

        #[cfg(windows)]
        let mut cmd = Command::new("cmd.exe");
        #[cfg(windows)]
        cmd.arg("/C");

        cmd.arg(&config.command)
            .current_dir(project_dir)
            .kill_on_drop(true);

        let output = tokio::time::timeout(
            Duration::from_secs(config.timeout_seconds),
            cmd.output(),
        )
        .await
        .map_err(|_| {
            HoistError::timeout(format!(
                "validation command `{}` timed out after {} seconds",
                config.command, config.timeout_seconds
            ))
        })?
        .map_err(|e| {
            HoistError::validation(format!("Failed to execute validation command: {}", e))
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let has_marker = |markers: &[String]| {
            markers
                .iter()
                .any(|m| stdout.contains(m.as_str()) || stderr.contains(m.as_str()))
        };
        let failed_marker = has_marker(&config.failure_markers);
        let success_marker = has_marker(&config.success_markers);
        let passed = !failed_marker && (output.status.success() || success_marker);

        debug!(
            exit_code,
            duration_ms,
            passed,
            failed_marker,
            "Validation command completed"
        );

        Ok(ValidationResult {
            passed,
            command: config.command.clone(),
            exit_code,
            stdout,
            stderr,
            duration_ms,
        })
    }
}
