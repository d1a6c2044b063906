//! Foundation Layer - error taxonomy and shared validation types
//!
//! Every other hoist crate depends on this one for:
//! - `HoistError` / `HoistResult`, the single error type used across crates
//! - Build-validation configuration and result types

pub mod error;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::*;
pub use validation::{ValidationConfig, ValidationResult};
