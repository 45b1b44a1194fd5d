//! Tester-level configuration.

use rule_tester_core::{DependencyConstraints, ParserOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default filenames used when a case does not declare one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultFilenames {
    /// Name for plain TypeScript cases.
    pub ts: String,
    /// Name for JSX cases.
    pub tsx: String,
}

impl Default for DefaultFilenames {
    fn default() -> Self {
        Self {
            ts: "file.ts".to_string(),
            tsx: "react.tsx".to_string(),
        }
    }
}

/// Construction-time configuration for a [`RuleTester`](crate::RuleTester).
///
/// Immutable for the life of the tester; every case derives its effective
/// configuration from this by override, never mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleTesterConfig {
    /// Parser identity shared by every case. When set, a case declaring a
    /// different parser is a configuration error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    /// Parser options shared by every case; case-level options override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<ParserOptions>,
    /// Dependency preconditions gating every case of every `run`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_constraints: Option<DependencyConstraints>,
    /// Default filenames keyed by source kind.
    pub default_filenames: DefaultFilenames,
}

impl RuleTesterConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parser identity.
    #[must_use]
    pub fn parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    /// Sets the shared parser options.
    #[must_use]
    pub fn parser_options(mut self, options: ParserOptions) -> Self {
        self.parser_options = Some(options);
        self
    }

    /// Sets the run-wide dependency preconditions.
    #[must_use]
    pub fn dependency_constraints(mut self, constraints: DependencyConstraints) -> Self {
        self.dependency_constraints = Some(constraints);
        self
    }

    /// Overrides the default filenames.
    #[must_use]
    pub fn default_filenames(
        mut self,
        ts: impl Into<String>,
        tsx: impl Into<String>,
    ) -> Self {
        self.default_filenames = DefaultFilenames {
            ts: ts.into(),
            tsx: tsx.into(),
        };
        self
    }
}

/// Configuration errors raised synchronously by
/// [`RuleTester::run`](crate::RuleTester::run) before any case is registered.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A test case tried to override the tester-level parser identity.
    #[error("Do not set the parser at the test level unless you want to use a parser other than \"{parser}\"")]
    TestLevelParser {
        /// The tester-level parser identity.
        parser: String,
    },

    /// An invalid case declared no expected diagnostics.
    #[error("Invalid test case `{code}` must declare at least one expected diagnostic")]
    MissingErrors {
        /// Source of the malformed case.
        code: String,
    },

    /// An expected diagnostic declared neither a message id nor a message.
    #[error("Expected diagnostic {index} of `{code}` must declare a messageId or a message")]
    UnidentifiedExpectation {
        /// Source of the malformed case.
        code: String,
        /// Zero-based index of the malformed expectation.
        index: usize,
    },

    /// An expected diagnostic referenced a message id the rule does not
    /// define.
    #[error("Rule `{rule}` has no message id `{message_id}` (known: {known})")]
    UnknownMessageId {
        /// Name of the rule under test.
        rule: String,
        /// The undeclared message id.
        message_id: String,
        /// Comma-separated list of declared message ids.
        known: String,
    },
}
