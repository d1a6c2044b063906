//! Types for build-validation configuration and results.

use serde::{Deserialize, Serialize};

/// Configuration for post-apply build validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Enable post-operation validation
    #[serde(default)]
    pub enabled: bool,
    /// Command to run for validation, executed from the project directory
    #[serde(default = "default_command")]
    pub command: String,
    /// Timeout in seconds (default: 300)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Output fragments that mark the build as failed
    #[serde(default = "default_failure_markers")]
    pub failure_markers: Vec<String>,
    /// Output fragments that mark the build as succeeded
    #[serde(default = "default_success_markers")]
    pub success_markers: Vec<String>,
}

fn default_command() -> String {
    "dotnet build --nologo".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_failure_markers() -> Vec<String> {
    vec!["Build FAILED".to_string(), "error CS".to_string()]
}

fn default_success_markers() -> Vec<String> {
    vec!["Build succeeded".to_string()]
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: default_command(),
            timeout_seconds: default_timeout(),
            failure_markers: default_failure_markers(),
            success_markers: default_success_markers(),
        }
    }
}

/// Result of running a validation command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub passed: bool,
    /// Command that was executed
    pub command: String,
    /// Exit code from command (-1 when terminated by a signal)
    pub exit_code: i32,
    /// Standard output from command
    pub stdout: String,
    /// Standard error from command
    pub stderr: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationResult {
    /// Last few lines of combined output, for failure notifications
    pub fn output_tail(&self, lines: usize) -> String {
        let combined: Vec<&str> = self
            .stdout
            .lines()
            .chain(self.stderr.lines())
            .filter(|l| !l.trim().is_empty())
            .collect();
        let start = combined.len().saturating_sub(lines);
        combined[start..].join("\n")
    }
}
