//! Built-in registration-then-execution adapter.
//!
//! [`TestPlan`] implements [`TestFramework`] as a pure collector: `run`
//! registers a tree of named closures, and nothing executes until
//! [`execute`](TestPlan::execute) is called. This is the adapter used when
//! hosting rule tests inside `cargo test`; real host frameworks plug in by
//! implementing [`TestFramework`] themselves.

use crate::failure::CaseFailure;
use crate::framework::{CaseBody, GroupBody, Hook, TestFramework};
use std::fmt::Write as _;
use tracing::debug;

/// How a case was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseMode {
    Normal,
    Only,
    Skip,
}

enum PlanNode {
    Group {
        name: String,
        skip: bool,
        children: Vec<PlanNode>,
    },
    Case {
        name: String,
        mode: CaseMode,
        body: CaseBody,
    },
}

/// A collected tree of registered tests, executed on demand.
#[derive(Default)]
pub struct TestPlan {
    nodes: Vec<PlanNode>,
    hooks: Vec<Hook>,
}

impl TestPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn group(&mut self, name: &str, skip: bool, body: GroupBody) {
        let mut child = Self::new();
        body(&mut child);
        // Hooks registered inside a group still run once, after everything.
        self.hooks.append(&mut child.hooks);
        self.nodes.push(PlanNode::Group {
            name: name.to_string(),
            skip,
            children: child.nodes,
        });
    }

    fn case(&mut self, name: &str, mode: CaseMode, body: CaseBody) {
        self.nodes.push(PlanNode::Case {
            name: name.to_string(),
            mode,
            body,
        });
    }

    fn contains_only(nodes: &[PlanNode]) -> bool {
        nodes.iter().any(|node| match node {
            PlanNode::Group { children, .. } => Self::contains_only(children),
            PlanNode::Case { mode, .. } => *mode == CaseMode::Only,
        })
    }

    /// Runs every collected case and then every `after_all` hook, exactly
    /// once each.
    ///
    /// If any case anywhere was registered as exclusive, only exclusive cases
    /// run; everything else is reported as skipped. Cases inside a skipped
    /// group never run, exclusive or not.
    #[must_use]
    pub fn execute(self) -> RunReport {
        let only_mode = Self::contains_only(&self.nodes);
        let mut report = RunReport::default();
        Self::run_nodes(self.nodes, &mut Vec::new(), false, only_mode, &mut report);

        for hook in self.hooks {
            hook();
        }

        debug!(
            "Plan executed: {} passed, {} failed, {} skipped",
            report.passed.len(),
            report.failed.len(),
            report.skipped.len()
        );
        report
    }

    fn run_nodes(
        nodes: Vec<PlanNode>,
        path: &mut Vec<String>,
        group_skipped: bool,
        only_mode: bool,
        report: &mut RunReport,
    ) {
        for node in nodes {
            match node {
                PlanNode::Group {
                    name,
                    skip,
                    children,
                } => {
                    path.push(name);
                    Self::run_nodes(children, path, group_skipped || skip, only_mode, report);
                    path.pop();
                }
                PlanNode::Case { name, mode, body } => {
                    let full_name = full_name(path, &name);
                    let skipped = group_skipped
                        || mode == CaseMode::Skip
                        || (only_mode && mode != CaseMode::Only);
                    if skipped {
                        report.skipped.push(full_name);
                        continue;
                    }
                    match body() {
                        Ok(()) => report.passed.push(full_name),
                        Err(failure) => report.failed.push((full_name, failure)),
                    }
                }
            }
        }
    }
}

impl TestFramework for TestPlan {
    fn describe(&mut self, name: &str, body: GroupBody) {
        self.group(name, false, body);
    }

    fn describe_skip(&mut self, name: &str, body: GroupBody) {
        self.group(name, true, body);
    }

    fn it(&mut self, name: &str, body: CaseBody) {
        self.case(name, CaseMode::Normal, body);
    }

    fn it_only(&mut self, name: &str, body: CaseBody) {
        self.case(name, CaseMode::Only, body);
    }

    fn it_skip(&mut self, name: &str, body: CaseBody) {
        self.case(name, CaseMode::Skip, body);
    }

    fn after_all(&mut self, hook: Hook) {
        self.hooks.push(hook);
    }
}

/// Outcome of executing a [`TestPlan`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Full paths of passing cases.
    pub passed: Vec<String>,
    /// Full paths of failing cases with their failures.
    pub failed: Vec<(String, CaseFailure)>,
    /// Full paths of cases registered but not run.
    pub skipped: Vec<String>,
}

impl RunReport {
    /// Returns true if no case failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Formats a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "\n=== rule-tester: {} failure(s) ===\n", self.failed.len());

        for (name, failure) in &self.failed {
            let _ = writeln!(report, "{name}");
            let _ = writeln!(report, "  {failure}");
            let _ = writeln!(report);
        }

        let _ = writeln!(
            report,
            "Total: {} passed, {} failed, {} skipped",
            self.passed.len(),
            self.failed.len(),
            self.skipped.len()
        );
        report
    }

    /// Panics with the formatted report if any case failed.
    ///
    /// # Panics
    ///
    /// Panics when the report contains at least one failure.
    pub fn assert_success(&self) {
        assert!(self.is_success(), "{}", self.format_report());
    }
}

fn full_name(path: &[String], name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{} :: {name}", path.join(" :: "))
    }
}
