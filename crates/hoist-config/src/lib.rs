//! Configuration management for hoist

pub mod config;
pub mod logging;

pub use config::{AppConfig, ConsolidationConfig, LogFormat, LoggingConfig};
