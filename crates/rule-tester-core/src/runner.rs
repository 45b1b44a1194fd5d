//! The opaque rule-execution collaborator.

use crate::cases::EffectiveCase;
use crate::diagnostics::RuleExecutionResult;
use crate::rule::Rule;
use thiserror::Error;

/// Errors from the rule execution engine.
#[derive(Debug, Clone, Error)]
pub enum RunnerError {
    /// The parser rejected the test case source.
    #[error("Parse error in {filename}: {message}")]
    Parse {
        /// Filename derived or declared for the case.
        filename: String,
        /// Parser error message.
        message: String,
    },

    /// The rule itself failed during analysis.
    #[error("Rule `{rule}` failed during analysis: {message}")]
    Rule {
        /// Name of the failing rule.
        rule: String,
        /// Failure detail.
        message: String,
    },
}

/// Parses a test case and runs one rule over it.
///
/// This is the seam between the tester and the lint engine: the tester treats
/// it as an opaque function and only compares the returned
/// [`RuleExecutionResult`] against the case's expectations. Implementations
/// may maintain internal parser caches; the tester schedules
/// [`clear_caches`](RuleRunner::clear_caches) to run once after all
/// registered tests have executed.
pub trait RuleRunner {
    /// Executes `rule` against the resolved test case.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the rule fails during analysis.
    /// Such errors surface as the failure of the individual case, never as a
    /// panic of the whole run.
    fn run_rule(
        &self,
        rule: &dyn Rule,
        case: &EffectiveCase,
    ) -> Result<RuleExecutionResult, RunnerError>;

    /// Clears any parser-level caches populated during rule execution.
    fn clear_caches(&self);
}
