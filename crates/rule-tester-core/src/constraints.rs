//! Dependency constraint declarations for test cases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dependency name mapped to its version requirement.
///
/// Ordered so that evaluation and reporting are deterministic.
pub type DependencyConstraints = BTreeMap<String, VersionConstraint>;

/// Options controlling how a range is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConstraintOptions {
    /// Match prerelease versions against release-only ranges.
    pub include_prerelease: bool,
}

/// A version requirement for one dependency.
///
/// The bare form is "at least this version" at whatever granularity is
/// given: `"10"`, `"10.0"`, or `"10.0.0"`. The structured form carries an
/// explicit range expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionConstraint {
    /// Bare minimum version.
    AtLeast(String),
    /// Explicit range expression.
    Range {
        /// Range expression (e.g., `"^10"`, `">=10.2"`).
        range: String,
        /// Evaluation options.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<ConstraintOptions>,
    },
}

impl VersionConstraint {
    /// Creates a bare "at least" constraint.
    #[must_use]
    pub fn at_least(version: impl Into<String>) -> Self {
        Self::AtLeast(version.into())
    }

    /// Creates a range constraint.
    #[must_use]
    pub fn range(range: impl Into<String>) -> Self {
        Self::Range {
            range: range.into(),
            options: None,
        }
    }

    /// Creates a range constraint with options.
    #[must_use]
    pub fn range_with_options(range: impl Into<String>, options: ConstraintOptions) -> Self {
        Self::Range {
            range: range.into(),
            options: Some(options),
        }
    }
}

impl From<&str> for VersionConstraint {
    fn from(version: &str) -> Self {
        Self::AtLeast(version.to_string())
    }
}

/// Convenience constructor for a constraints map.
#[must_use]
pub fn constraints<I, N, C>(entries: I) -> DependencyConstraints
where
    I: IntoIterator<Item = (N, C)>,
    N: Into<String>,
    C: Into<VersionConstraint>,
{
    entries
        .into_iter()
        .map(|(name, constraint)| (name.into(), constraint.into()))
        .collect()
}
