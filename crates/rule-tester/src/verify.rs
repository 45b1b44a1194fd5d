//! Comparison of rule execution results against case expectations.

use crate::failure::CaseFailure;
use rule_tester_core::{
    Diagnostic, EffectiveCase, Expectation, ExpectedDiagnostic, ExpectedOutput,
    RuleExecutionResult,
};

/// Verifies an execution result against the case's expectation.
///
/// # Errors
///
/// Returns the first divergence found: for valid cases any diagnostic at all,
/// for invalid cases a count or field mismatch in declaration order, then any
/// output mismatch.
pub fn verify_case(case: &EffectiveCase, result: &RuleExecutionResult) -> Result<(), CaseFailure> {
    match &case.expectation {
        Expectation::Valid => verify_valid(&result.diagnostics),
        Expectation::Invalid { errors, output } => {
            verify_diagnostics(errors, &result.diagnostics)?;
            verify_output(output.as_ref(), result.output.as_deref())
        }
    }
}

fn verify_valid(diagnostics: &[Diagnostic]) -> Result<(), CaseFailure> {
    match diagnostics.first() {
        None => Ok(()),
        Some(first) => Err(CaseFailure::UnexpectedDiagnostics {
            count: diagnostics.len(),
            message_id: first.message_id.clone(),
            message: first.message.clone(),
            line: first.line,
            column: first.column,
        }),
    }
}

fn verify_diagnostics(
    expected: &[ExpectedDiagnostic],
    actual: &[Diagnostic],
) -> Result<(), CaseFailure> {
    if expected.len() != actual.len() {
        return Err(CaseFailure::DiagnosticCountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    for (index, (want, got)) in expected.iter().zip(actual).enumerate() {
        if let Some(message_id) = &want.message_id {
            if message_id != &got.message_id {
                return Err(field_mismatch(index, "messageId", message_id, &got.message_id));
            }
        }
        if let Some(message) = &want.message {
            if message != &got.message {
                return Err(field_mismatch(index, "message", message, &got.message));
            }
        }
        if let Some(line) = want.line {
            if line != got.line {
                return Err(field_mismatch(index, "line", line, got.line));
            }
        }
        if let Some(column) = want.column {
            if column != got.column {
                return Err(field_mismatch(index, "column", column, got.column));
            }
        }
        if let Some(end_line) = want.end_line {
            if Some(end_line) != got.end_line {
                return Err(field_mismatch(index, "endLine", end_line, display_opt(got.end_line)));
            }
        }
        if let Some(end_column) = want.end_column {
            if Some(end_column) != got.end_column {
                return Err(field_mismatch(
                    index,
                    "endColumn",
                    end_column,
                    display_opt(got.end_column),
                ));
            }
        }
    }

    Ok(())
}

fn verify_output(
    expected: Option<&ExpectedOutput>,
    actual: Option<&str>,
) -> Result<(), CaseFailure> {
    match (expected, actual) {
        // Undeclared output is not checked.
        (None, _) => Ok(()),
        (Some(ExpectedOutput::Fixed(want)), Some(got)) => {
            if want == got {
                Ok(())
            } else {
                Err(CaseFailure::OutputMismatch {
                    expected: want.clone(),
                    actual: got.to_string(),
                })
            }
        }
        (Some(ExpectedOutput::Fixed(want)), None) => Err(CaseFailure::MissingFix {
            expected: want.clone(),
        }),
        (Some(ExpectedOutput::Unfixed), None) => Ok(()),
        (Some(ExpectedOutput::Unfixed), Some(got)) => Err(CaseFailure::UnexpectedFix {
            actual: got.to_string(),
        }),
    }
}

fn field_mismatch(
    index: usize,
    field: &'static str,
    expected: impl ToString,
    actual: impl ToString,
) -> CaseFailure {
    CaseFailure::DiagnosticFieldMismatch {
        index,
        field,
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

fn display_opt(value: Option<usize>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}
