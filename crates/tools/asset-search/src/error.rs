//! Error type for tool operations.

use thiserror::Error;

/// Error type returned by tool operations.
///
/// Transport failures never reach this type: they are absorbed by the
/// fail-soft boundary in [`crate::search::search_assets`]. What remains are
/// caller mistakes and structural faults in upstream data.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Invalid input provided to the tool.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error during tool execution.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create an invalid input error.
    pub fn invalid_input<S: ToString>(s: S) -> Self {
        ToolError::InvalidInput(s.to_string())
    }

    /// Create an internal error.
    pub fn internal<S: ToString>(s: S) -> Self {
        ToolError::Internal(s.to_string())
    }
}
