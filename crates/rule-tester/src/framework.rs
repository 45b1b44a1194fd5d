//! The test-framework abstraction hosting generated test cases.

use crate::failure::CaseFailure;

/// Body of a `describe` group; registers nested groups and cases.
pub type GroupBody = Box<dyn FnOnce(&mut dyn TestFramework)>;

/// Body of a single test case. `Err` is the failure channel: the adapter
/// reports it however the host framework reports failing tests.
pub type CaseBody = Box<dyn FnOnce() -> Result<(), CaseFailure>>;

/// Deferred hook, invoked exactly once after all registered tests have run.
pub type Hook = Box<dyn FnOnce()>;

/// Capability interface for the host test framework.
///
/// The tester registers a tree of named closures through this trait during
/// [`run`](crate::RuleTester::run) and never executes case bodies itself;
/// execution order and concurrency belong entirely to the adapter. Swapping
/// the adapter must not change tester behavior.
pub trait TestFramework {
    /// Registers a named group of tests.
    fn describe(&mut self, name: &str, body: GroupBody);

    /// Registers a named group whose entire contents are skipped.
    fn describe_skip(&mut self, name: &str, body: GroupBody);

    /// Registers a single test case.
    fn it(&mut self, name: &str, body: CaseBody);

    /// Registers a test case that runs to the exclusion of non-exclusive
    /// cases.
    fn it_only(&mut self, name: &str, body: CaseBody);

    /// Registers a test case that is reported but never run.
    fn it_skip(&mut self, name: &str, body: CaseBody);

    /// Registers a hook invoked exactly once after all tests have run.
    fn after_all(&mut self, hook: Hook);
}
