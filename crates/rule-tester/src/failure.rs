//! Per-case failure reporting.

use miette::SourceSpan;
use rule_tester_core::{EffectiveCase, RunnerError};

/// Why a single test case failed.
///
/// Reported through the adapter's failure channel at execution time; one
/// case's failure never aborts its siblings.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaseFailure {
    /// A valid case produced diagnostics.
    #[error("Expected no diagnostics but found {count}; first: [{message_id}] {message} at {line}:{column}")]
    UnexpectedDiagnostics {
        /// Number of diagnostics produced.
        count: usize,
        /// Message id of the first diagnostic.
        message_id: String,
        /// Message of the first diagnostic.
        message: String,
        /// Start line of the first diagnostic.
        line: usize,
        /// Start column of the first diagnostic.
        column: usize,
    },

    /// The number of diagnostics differs from the declared expectations.
    #[error("Expected {expected} diagnostic(s) but found {actual}")]
    DiagnosticCountMismatch {
        /// Declared diagnostic count.
        expected: usize,
        /// Actual diagnostic count.
        actual: usize,
    },

    /// A diagnostic field diverges from its expectation. Reports the first
    /// divergence only.
    #[error("Diagnostic {index}: expected {field} `{expected}` but found `{actual}`")]
    DiagnosticFieldMismatch {
        /// Zero-based index of the diverging diagnostic.
        index: usize,
        /// Name of the diverging field.
        field: &'static str,
        /// Declared value.
        expected: String,
        /// Actual value.
        actual: String,
    },

    /// The fixed output differs from the declared output.
    #[error("Expected fixed output `{expected}` but found `{actual}`")]
    OutputMismatch {
        /// Declared fixed output.
        expected: String,
        /// Actual fixed output.
        actual: String,
    },

    /// The case declared no fix but the rule produced one.
    #[error("Expected no fix but the rule produced `{actual}`")]
    UnexpectedFix {
        /// The fix the rule produced.
        actual: String,
    },

    /// The case declared a fixed output but the rule produced no fix.
    #[error("Expected fixed output `{expected}` but the rule produced no fix")]
    MissingFix {
        /// Declared fixed output.
        expected: String,
    },

    /// The rule execution engine itself failed.
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

impl CaseFailure {
    /// Returns the snippet position this failure points at, if it has one.
    #[must_use]
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::UnexpectedDiagnostics { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Converts a case failure into a miette diagnostic anchored in the case
/// source, for rich terminal rendering.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct CaseFailureDiagnostic {
    message: String,
    #[source_code]
    code: String,
    #[label("{label_message}")]
    span: Option<SourceSpan>,
    label_message: String,
}

impl CaseFailureDiagnostic {
    /// Builds a renderable diagnostic for `failure` against `case`.
    #[must_use]
    pub fn new(case: &EffectiveCase, failure: &CaseFailure) -> Self {
        let span = failure
            .location()
            .map(|(line, column)| SourceSpan::from((offset_for(&case.code, line, column), 1)));
        Self {
            message: failure.to_string(),
            code: case.code.clone(),
            span,
            label_message: case.filename.clone(),
        }
    }
}

/// Calculates the byte offset of a 1-indexed line and column in `code`.
///
/// Out-of-bounds positions clamp to the end of the text.
fn offset_for(code: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let mut offset = 0;
    for (i, line_content) in code.lines().enumerate() {
        if i + 1 == line {
            return offset + column.saturating_sub(1).min(line_content.len());
        }
        offset += line_content.len() + 1; // +1 for newline
    }

    code.len()
}
