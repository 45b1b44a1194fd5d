//! Rule metadata for testable rules.

use std::collections::BTreeMap;

/// Metadata describing a rule's reportable messages.
///
/// The tester validates expected `messageId`s against this map before any
/// case is registered, so a typo in a test fails fast instead of producing a
/// confusing mismatch at execution time.
#[derive(Debug, Clone, Default)]
pub struct RuleMeta {
    /// Brief description of what the rule checks.
    pub description: String,
    /// Message templates keyed by message id.
    pub messages: BTreeMap<String, String>,
    /// Whether the rule can produce automatic fixes.
    pub fixable: bool,
}

impl RuleMeta {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a message template.
    #[must_use]
    pub fn message(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(id.into(), template.into());
        self
    }

    /// Marks the rule as fixable.
    #[must_use]
    pub fn fixable(mut self) -> Self {
        self.fixable = true;
        self
    }
}

/// A testable lint rule.
///
/// The tester never executes rule logic itself; it only reads metadata here
/// and hands the rule to the [`RuleRunner`](crate::RuleRunner) collaborator.
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-explicit-any").
    fn name(&self) -> &'static str;

    /// Returns the rule's metadata.
    fn meta(&self) -> &RuleMeta;

    /// Returns true if the rule declares a message with the given id.
    fn has_message(&self, message_id: &str) -> bool {
        self.meta().messages.contains_key(message_id)
    }
}
