//! # rule-tester
//!
//! A rule-testing engine for static-analysis lint rules.
//!
//! A [`RuleTester`] executes one rule against a battery of valid/invalid
//! source snippets, enforces per-case dependency preconditions, derives file
//! identities for type-aware parsing, and reports pass/fail through a
//! pluggable [`TestFramework`] adapter. Parser caches are cleaned up through
//! a one-shot `after_all` hook scheduled at construction, regardless of how
//! the run goes.
//!
//! ## Example
//!
//! ```ignore
//! use rule_tester::{RuleTester, RuleTesterConfig, RunCases};
//! use rule_tester_core::{ExpectedDiagnostic, InvalidTestCase};
//!
//! let mut tester = RuleTester::with_plan(
//!     RuleTesterConfig::new().parser("@typescript-eslint/parser"),
//!     runner,
//!     versions,
//! );
//!
//! tester.run("no-explicit-any", rule, RunCases::new()
//!     .valid(["const x: number = 1;"])
//!     .invalid([InvalidTestCase::new(
//!         "const x: any = 1;",
//!         vec![ExpectedDiagnostic::for_message_id("noAny")],
//!     )]))?;
//!
//! tester.into_framework().execute().assert_success();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod constraints;
mod failure;
mod filenames;
mod framework;
mod plan;
mod tester;
mod verify;

pub use config::{ConfigError, DefaultFilenames, RuleTesterConfig};
pub use constraints::{satisfies, satisfies_all};
pub use failure::{CaseFailure, CaseFailureDiagnostic};
pub use filenames::derive_filename;
pub use framework::{CaseBody, GroupBody, Hook, TestFramework};
pub use plan::{RunReport, TestPlan};
pub use tester::{RuleTester, RunCases, ALL_SKIPPED_CASE_NAME};
pub use verify::verify_case;
