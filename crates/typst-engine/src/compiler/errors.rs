//! Error types for rendering

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A compiler diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileError {
    pub message: String,
    /// Hints joined with "; "
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub severity: ErrorSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// Rendering failures
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid asset '{0}': {1}")]
    AssetError(String, String),

    #[error("Path security violation: {0}")]
    PathSecurityViolation(String),

    #[error("Compilation failed: {}", summarize(.0))]
    CompileFailed(Vec<CompileError>),

    #[error("Compilation timeout after {0}ms")]
    Timeout(u64),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Document has no content")]
    EmptyDocument,
}

fn summarize(errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            severity: ErrorSeverity::Error,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn as_warning(mut self) -> Self {
        self.severity = ErrorSeverity::Warning;
        self
    }
}
