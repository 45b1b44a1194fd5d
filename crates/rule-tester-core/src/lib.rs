//! # rule-tester-core
//!
//! Shared interface between a lint engine and its rule tester.
//!
//! This crate defines the contract a rule tester needs from the engine it
//! drives, without depending on any particular engine:
//!
//! - [`Diagnostic`] and [`RuleExecutionResult`] for what a rule reports
//! - [`Rule`] for the metadata of a testable rule
//! - [`RuleRunner`] for the opaque parse-and-lint collaborator
//! - [`ValidTestCase`] / [`InvalidTestCase`] for the test case model
//! - [`VersionConstraint`] and [`VersionLookup`] for per-case dependency
//!   preconditions
//!
//! ## Example
//!
//! ```ignore
//! use rule_tester_core::{InvalidTestCase, ExpectedDiagnostic};
//!
//! let case = InvalidTestCase::new(
//!     "const x: any = 1;",
//!     vec![ExpectedDiagnostic::for_message_id("noAny").at(1, 10)],
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cases;
mod constraints;
mod diagnostics;
mod rule;
mod runner;
mod versions;

pub use cases::{
    EcmaFeatures, EffectiveCase, Expectation, ExpectedDiagnostic, ExpectedOutput, InvalidTestCase,
    ParserOptions, TestCaseSpec, ValidTestCase,
};
pub use constraints::{constraints, ConstraintOptions, DependencyConstraints, VersionConstraint};
pub use diagnostics::{Diagnostic, RuleExecutionResult, Severity};
pub use rule::{Rule, RuleMeta};
pub use runner::{RuleRunner, RunnerError};
pub use versions::{LockfileError, LockfileVersions, StaticVersions, VersionLookup};
