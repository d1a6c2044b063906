//! Centralized logging initialization with environment variable support

use crate::{AppConfig, LogFormat};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing subscriber with environment variable support
///
/// Environment variables (in priority order):
/// - `RUST_LOG`: Standard Rust log filter (takes precedence over all)
/// - `LOG_LEVEL`: Set log level (trace, debug, info, warn, error)
/// - `LOG_FORMAT`: Override format (json, pretty)
///
/// # Examples
///
/// ```bash
/// # See every file the walker visits
/// LOG_LEVEL=debug hoist MyApp.sln
///
/// # Module-specific filtering
/// RUST_LOG=hoist_services=debug hoist src/App/App.csproj
/// ```
pub fn initialize(config: &AppConfig) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| config.logging.level.clone());
    let log_level = level.parse().unwrap_or(tracing::Level::WARN);

    // RUST_LOG takes precedence over config
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(log_level.into()));

    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|f| match f.to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "human" => Some(LogFormat::Pretty),
            _ => None,
        })
        .unwrap_or_else(|| config.logging.format.clone());

    // Always write to stderr to keep stdout clean for reports
    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

/// Create an operation span with standard fields for context propagation
///
/// The orchestrators take this span as a parameter and run inside it, so every
/// log line of one consolidation run carries the operation kind and target.
///
/// # Example
///
/// ```rust
/// use hoist_config::logging::operation_span;
///
/// let span = operation_span("project", "src/App/App.csproj");
/// let _enter = span.enter();
/// tracing::info!("Scanning project");
/// ```
pub fn operation_span(kind: &str, target: &str) -> tracing::Span {
    tracing::info_span!(
        "consolidate",
        kind = %kind,
        target = %target
    )
}
