//! Diagnostic types reported by rule execution.

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single issue reported by a rule against a test snippet.
///
/// Locations are 1-indexed and relative to the snippet, not to any real file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Identifier of the message template in the rule's meta.
    pub message_id: String,
    /// Rendered human-readable message.
    pub message: String,
    /// Line the issue starts on (1-indexed).
    pub line: usize,
    /// Column the issue starts on (1-indexed).
    pub column: usize,
    /// Line the issue ends on, if the engine reports spans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    /// Column the issue ends on, if the engine reports spans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    /// Severity assigned by the engine.
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates a new error-severity diagnostic.
    #[must_use]
    pub fn new(
        message_id: impl Into<String>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            message: message.into(),
            line,
            column,
            end_line: None,
            end_column: None,
            severity: Severity::Error,
        }
    }

    /// Sets the end position of the reported span.
    #[must_use]
    pub fn with_end(mut self, end_line: usize, end_column: usize) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Result of executing one rule against one test case.
///
/// The tester only compares `diagnostics` and `output` against the case's
/// expectations; the tree snapshots are carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleExecutionResult {
    /// Diagnostics reported by the rule, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Source text after applying fixes, or `None` if no fix was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Opaque snapshot of the syntax tree before fixes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_ast: Option<serde_json::Value>,
    /// Opaque snapshot of the syntax tree after fixes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_ast: Option<serde_json::Value>,
}

impl RuleExecutionResult {
    /// Creates a result with the given diagnostics and no fix.
    #[must_use]
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            ..Self::default()
        }
    }

    /// Sets the fixed output.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}
