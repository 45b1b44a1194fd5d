//! The test case model: declared cases, expectations, and the resolved form
//! handed to the rule runner.

use crate::constraints::DependencyConstraints;
use serde::{Deserialize, Serialize};

/// Syntax feature toggles understood by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EcmaFeatures {
    /// Whether JSX syntax is enabled.
    pub jsx: bool,
}

/// Parser configuration for a tester or an individual case.
///
/// Case-level options carrying type-aware fields (`project`,
/// `tsconfig_root_dir`) override the tester-level options for that case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Project file enabling type-aware analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Root directory for type-aware analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsconfig_root_dir: Option<String>,
    /// Syntax feature toggles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecma_features: Option<EcmaFeatures>,
    /// Whether to use the project service instead of manual project config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_project_service: Option<bool>,
    /// Engine-specific options passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ParserOptions {
    /// Creates empty parser options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project file.
    #[must_use]
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the root directory for type-aware analysis.
    #[must_use]
    pub fn tsconfig_root_dir(mut self, dir: impl Into<String>) -> Self {
        self.tsconfig_root_dir = Some(dir.into());
        self
    }

    /// Enables or disables JSX.
    #[must_use]
    pub fn jsx(mut self, jsx: bool) -> Self {
        self.ecma_features = Some(EcmaFeatures { jsx });
        self
    }

    /// Enables or disables the project service.
    #[must_use]
    pub fn use_project_service(mut self, enabled: bool) -> Self {
        self.use_project_service = Some(enabled);
        self
    }
}

/// The declared shape of a single test case, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCaseSpec {
    /// Source text to lint.
    pub code: String,
    /// Explicit file identity; derived from parser options when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Case-level parser identity. Rejected when it conflicts with a
    /// tester-level parser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    /// Case-level parser options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<ParserOptions>,
    /// Dependency preconditions for this case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_constraints: Option<DependencyConstraints>,
    /// Run this case to the exclusion of all non-`only` cases.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub only: bool,
}

impl TestCaseSpec {
    /// Creates a spec with only `code` set.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit filename.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets a case-level parser identity.
    #[must_use]
    pub fn parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    /// Sets case-level parser options.
    #[must_use]
    pub fn parser_options(mut self, options: ParserOptions) -> Self {
        self.parser_options = Some(options);
        self
    }

    /// Sets dependency preconditions.
    #[must_use]
    pub fn dependency_constraints(mut self, constraints: DependencyConstraints) -> Self {
        self.dependency_constraints = Some(constraints);
        self
    }

    /// Marks this case as exclusive.
    #[must_use]
    pub fn only(mut self) -> Self {
        self.only = true;
        self
    }
}

/// A test case expected to produce no diagnostics.
///
/// Either bare source text (sugar for a spec with only `code` set) or a
/// structured spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidTestCase {
    /// Bare source text.
    Source(String),
    /// Structured test case.
    Case(TestCaseSpec),
}

impl ValidTestCase {
    /// Normalizes to the structured form.
    #[must_use]
    pub fn into_spec(self) -> TestCaseSpec {
        match self {
            Self::Source(code) => TestCaseSpec::new(code),
            Self::Case(spec) => spec,
        }
    }

    /// Returns the declared parser identity, if any.
    #[must_use]
    pub fn parser(&self) -> Option<&str> {
        match self {
            Self::Source(_) => None,
            Self::Case(spec) => spec.parser.as_deref(),
        }
    }

    /// Returns true if this case is marked exclusive.
    #[must_use]
    pub fn is_only(&self) -> bool {
        matches!(self, Self::Case(spec) if spec.only)
    }
}

impl From<&str> for ValidTestCase {
    fn from(code: &str) -> Self {
        Self::Source(code.to_string())
    }
}

impl From<String> for ValidTestCase {
    fn from(code: String) -> Self {
        Self::Source(code)
    }
}

impl From<TestCaseSpec> for ValidTestCase {
    fn from(spec: TestCaseSpec) -> Self {
        Self::Case(spec)
    }
}

/// An expected diagnostic for an invalid case.
///
/// Must declare at least a message id or a message; all other fields are
/// compared only when declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpectedDiagnostic {
    /// Identifier of the expected message template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Expected rendered message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Expected start line (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Expected start column (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Expected end line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    /// Expected end column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
}

impl ExpectedDiagnostic {
    /// Expects a diagnostic with the given message id.
    #[must_use]
    pub fn for_message_id(id: impl Into<String>) -> Self {
        Self {
            message_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Expects a diagnostic with the given rendered message.
    #[must_use]
    pub fn for_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Declares the expected start position.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Declares the expected end position.
    #[must_use]
    pub fn ending_at(mut self, end_line: usize, end_column: usize) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    /// Returns true if neither a message id nor a message is declared.
    #[must_use]
    pub fn is_unidentified(&self) -> bool {
        self.message_id.is_none() && self.message.is_none()
    }
}

/// Expected autofix output for an invalid case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedOutput {
    /// The fixer must produce exactly this source text.
    Fixed(String),
    /// The rule must not produce a fix.
    Unfixed,
}

/// A test case expected to produce the declared diagnostics, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvalidTestCase {
    /// The common case fields.
    #[serde(flatten)]
    pub spec: TestCaseSpec,
    /// Expected diagnostics; must be non-empty.
    pub errors: Vec<ExpectedDiagnostic>,
    /// Expected autofix output, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<ExpectedOutput>,
}

impl InvalidTestCase {
    /// Creates an invalid case from source text and expected diagnostics.
    #[must_use]
    pub fn new(code: impl Into<String>, errors: Vec<ExpectedDiagnostic>) -> Self {
        Self {
            spec: TestCaseSpec::new(code),
            errors,
            output: None,
        }
    }

    /// Declares the expected fixed output.
    #[must_use]
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(ExpectedOutput::Fixed(output.into()));
        self
    }

    /// Declares that the rule must not produce a fix.
    #[must_use]
    pub fn no_fix(mut self) -> Self {
        self.output = Some(ExpectedOutput::Unfixed);
        self
    }

    /// Sets an explicit filename.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.spec.filename = Some(filename.into());
        self
    }

    /// Sets a case-level parser identity.
    #[must_use]
    pub fn parser(mut self, parser: impl Into<String>) -> Self {
        self.spec.parser = Some(parser.into());
        self
    }

    /// Sets case-level parser options.
    #[must_use]
    pub fn parser_options(mut self, options: ParserOptions) -> Self {
        self.spec.parser_options = Some(options);
        self
    }

    /// Sets dependency preconditions.
    #[must_use]
    pub fn dependency_constraints(mut self, constraints: DependencyConstraints) -> Self {
        self.spec.dependency_constraints = Some(constraints);
        self
    }

    /// Marks this case as exclusive.
    #[must_use]
    pub fn only(mut self) -> Self {
        self.spec.only = true;
        self
    }
}

/// What the tester expects from executing a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expectation {
    /// No diagnostics at all.
    Valid,
    /// The declared diagnostics, in order, and optionally a fix.
    Invalid {
        /// Expected diagnostics.
        errors: Vec<ExpectedDiagnostic>,
        /// Expected autofix output, when declared.
        output: Option<ExpectedOutput>,
    },
}

/// The fully resolved case handed to the rule runner.
///
/// `filename` and `skip` are always present; everything else is the declared
/// case passed through. Filename derivation never overwrites an explicitly
/// declared filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveCase {
    /// Source text to lint.
    pub code: String,
    /// Resolved file identity.
    pub filename: String,
    /// Whether dependency constraints excluded this case from execution.
    pub skip: bool,
    /// Whether this case is marked exclusive.
    pub only: bool,
    /// Case-level parser options, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<ParserOptions>,
    /// Dependency preconditions, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_constraints: Option<DependencyConstraints>,
    /// What to verify after execution.
    pub expectation: Expectation,
}
