//! Error types for the autowidth crate.
//!
//! Width estimation itself never fails: hook errors are absorbed by the cell
//! resolver. The only fallible surface is loading a [`WidthConfig`](crate::WidthConfig).

use thiserror::Error;

/// Error returned by a column hook.
///
/// Hooks return this to signal that they could not produce a value for a
/// cell. The resolver treats it as "no result" and moves on to the next step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column hook failed: {0}")]
pub struct HookError(pub String);

impl HookError {
    /// Create a hook error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        HookError(message.into())
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        HookError(message)
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        HookError(message.to_string())
    }
}

/// Errors that can occur when loading a width configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// YAML source failed to parse.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON source failed to parse.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
