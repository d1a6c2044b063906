//! Configuration management for hoist

use hoist_foundation::{HoistError, HoistResult, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File names searched (in order) for a TOML configuration file
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["hoist.toml", ".hoist/config.toml"];

/// Prefix for environment variable overrides, e.g. `HOIST__CONSOLIDATION__PREVIEW=false`
pub const ENV_PREFIX: &str = "HOIST__";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Using-directive consolidation settings
    #[serde(default)]
    pub consolidation: ConsolidationConfig,
    /// Post-apply build validation
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Log output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format for machine consumption
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Settings that drive scanning, merging and the confirmation flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationConfig {
    /// Directory names pruned during the walk (hidden directories are always pruned)
    pub skip_dirs: Vec<String>,
    /// Namespace roots placed, in order, ahead of the fallback group
    pub priority_prefixes: Vec<String>,
    /// Name of the consolidated declarations file at the project root
    pub consolidated_file_name: String,
    /// Suffix identifying source files
    pub source_suffix: String,
    /// Suffix identifying project manifests
    pub project_manifest_suffix: String,
    /// Show the merged result and ask for confirmation before writing
    pub preview: bool,
    /// Warn about alias collisions and duplicate static imports
    pub conflict_check: bool,
    /// Maximum number of files read concurrently while scanning
    pub max_concurrency: usize,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            skip_dirs: ["bin", "obj", "node_modules", "packages", ".git", ".vs", ".vscode", ".idea", "TestResults"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            priority_prefixes: vec!["System".to_string(), "Microsoft".to_string()],
            consolidated_file_name: "GlobalUsings.cs".to_string(),
            source_suffix: ".cs".to_string(),
            project_manifest_suffix: ".csproj".to_string(),
            preview: true,
            conflict_check: true,
            max_concurrency: 16,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and config files
    ///
    /// Configuration is loaded in the following priority order (highest to lowest):
    /// 1. Environment variables (HOIST__*)
    /// 2. `hoist.toml` or `.hoist/config.toml` in `base_dir`
    /// 3. Default values
    pub fn load_from(base_dir: &Path) -> HoistResult<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Toml},
            Figment,
        };

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        for candidate in CONFIG_FILE_CANDIDATES {
            let path = base_dir.join(candidate);
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading TOML configuration");
                figment = figment.merge(Toml::file(path));
                break; // Use first found TOML file
            }
        }

        let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: AppConfig = figment
            .extract()
            .map_err(|e| HoistError::config(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;

        tracing::debug!(
            skip_dirs = config.consolidation.skip_dirs.len(),
            validation_enabled = config.validation.enabled,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Reject settings the orchestrators cannot work with
    pub fn validate(&self) -> HoistResult<()> {
        let consolidation = &self.consolidation;
        if consolidation.consolidated_file_name.trim().is_empty() {
            return Err(HoistError::config("consolidated_file_name must not be empty"));
        }
        if !consolidation
            .consolidated_file_name
            .ends_with(&consolidation.source_suffix)
        {
            return Err(HoistError::config(format!(
                "consolidated_file_name '{}' must end with source suffix '{}'",
                consolidation.consolidated_file_name, consolidation.source_suffix
            )));
        }
        if consolidation.max_concurrency == 0 {
            return Err(HoistError::config("max_concurrency must be at least 1"));
        }
        if self.validation.enabled && self.validation.command.trim().is_empty() {
            return Err(HoistError::config("validation command must not be empty"));
        }
        if self.validation.timeout_seconds == 0 {
            return Err(HoistError::config("validation timeout must be at least 1 second"));
        }
        Ok(())
    }
}
