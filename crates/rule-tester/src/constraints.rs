//! Dependency constraint evaluation.

use rule_tester_core::{ConstraintOptions, DependencyConstraints, VersionConstraint, VersionLookup};
use semver::{Version, VersionReq};
use tracing::{debug, warn};

/// Returns true iff every declared constraint is satisfied.
///
/// An empty map is vacuously satisfied. An unknown dependency or a malformed
/// range makes its constraint unsatisfied; evaluation never fails.
#[must_use]
pub fn satisfies_all(constraints: &DependencyConstraints, lookup: &dyn VersionLookup) -> bool {
    constraints
        .iter()
        .all(|(name, constraint)| satisfies(name, constraint, lookup))
}

/// Evaluates a single dependency constraint against the installed version.
#[must_use]
pub fn satisfies(name: &str, constraint: &VersionConstraint, lookup: &dyn VersionLookup) -> bool {
    let Some(installed) = lookup.installed_version(name) else {
        warn!("Dependency `{name}` is not installed; constraint is unsatisfied");
        return false;
    };

    let (range, options) = match constraint {
        VersionConstraint::AtLeast(version) => {
            (format!(">={version}"), ConstraintOptions::default())
        }
        VersionConstraint::Range { range, options } => {
            (range.clone(), options.unwrap_or_default())
        }
    };

    let req = match VersionReq::parse(&range) {
        Ok(req) => req,
        Err(e) => {
            warn!("Invalid version range `{range}` for `{name}`: {e}");
            return false;
        }
    };

    // Ranges without a prerelease component never match prerelease versions.
    // `includePrerelease` relaxes that by matching the release core instead.
    let candidate = if options.include_prerelease && !installed.pre.is_empty() {
        Version::new(installed.major, installed.minor, installed.patch)
    } else {
        installed.clone()
    };

    let satisfied = req.matches(&candidate);
    debug!("Constraint `{name}` `{range}`: installed {installed}, satisfied {satisfied}");
    satisfied
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_tester_core::{constraints, StaticVersions};

    fn lookup() -> StaticVersions {
        StaticVersions::new()
            .try_with("totally-real-dependency", "10.0.0")
            .and_then(|v| v.try_with("totally-real-dependency-prerelease", "10.0.0-rc.1"))
            .and_then(|v| v.try_with("fresh-dependency", "10.5.2"))
            .expect("valid versions")
    }

    #[test]
    fn empty_constraints_are_vacuously_satisfied() {
        assert!(satisfies_all(&DependencyConstraints::new(), &lookup()));
    }

    #[test]
    fn bare_major_is_at_least() {
        let lookup = lookup();
        let major = VersionConstraint::at_least("10");
        assert!(satisfies("totally-real-dependency", &major, &lookup));
        assert!(satisfies("fresh-dependency", &major, &lookup));

        let too_new = VersionConstraint::at_least("999");
        assert!(!satisfies("totally-real-dependency", &too_new, &lookup));
    }

    #[test]
    fn bare_constraint_respects_granularity() {
        let lookup = lookup();
        for version in ["10", "10.0", "10.0.0"] {
            assert!(
                satisfies(
                    "totally-real-dependency",
                    &VersionConstraint::at_least(version),
                    &lookup
                ),
                "expected 10.0.0 to satisfy at-least {version}"
            );
        }
        for version in ["999", "999.0", "999.0.0"] {
            assert!(!satisfies(
                "totally-real-dependency",
                &VersionConstraint::at_least(version),
                &lookup
            ));
        }
    }

    #[test]
    fn at_least_is_not_satisfied_by_older_version() {
        let lookup = StaticVersions::new()
            .try_with("totally-real-dependency", "9.9.9")
            .expect("valid version");
        assert!(!satisfies(
            "totally-real-dependency",
            &VersionConstraint::at_least("10"),
            &lookup
        ));
    }

    #[test]
    fn range_follows_caret_semantics() {
        let lookup = lookup();
        assert!(satisfies(
            "totally-real-dependency",
            &VersionConstraint::range("^10"),
            &lookup
        ));
        assert!(satisfies(
            "totally-real-dependency",
            &VersionConstraint::range("<999"),
            &lookup
        ));
        assert!(!satisfies(
            "totally-real-dependency",
            &VersionConstraint::range("^999"),
            &lookup
        ));
        assert!(!satisfies(
            "totally-real-dependency",
            &VersionConstraint::range(">=999.0"),
            &lookup
        ));
    }

    #[test]
    fn prerelease_is_excluded_unless_opted_in() {
        let lookup = lookup();
        let plain = VersionConstraint::range("^10");
        assert!(!satisfies("totally-real-dependency-prerelease", &plain, &lookup));

        let opted_out = VersionConstraint::range_with_options(
            "^10",
            ConstraintOptions {
                include_prerelease: false,
            },
        );
        assert!(!satisfies(
            "totally-real-dependency-prerelease",
            &opted_out,
            &lookup
        ));

        let opted_in = VersionConstraint::range_with_options(
            "^10",
            ConstraintOptions {
                include_prerelease: true,
            },
        );
        assert!(satisfies(
            "totally-real-dependency-prerelease",
            &opted_in,
            &lookup
        ));
    }

    #[test]
    fn unknown_dependency_fails_closed() {
        assert!(!satisfies(
            "totally-fake-dependency",
            &VersionConstraint::at_least("1"),
            &lookup()
        ));
    }

    #[test]
    fn malformed_range_fails_closed() {
        assert!(!satisfies(
            "totally-real-dependency",
            &VersionConstraint::range("not a range"),
            &lookup()
        ));
    }

    #[test]
    fn all_requires_every_constraint() {
        let lookup = lookup();
        let passing = constraints([
            ("totally-real-dependency", "10"),
            ("fresh-dependency", "10.5"),
        ]);
        assert!(satisfies_all(&passing, &lookup));

        let mixed = constraints([
            ("totally-real-dependency", "10"),
            ("fresh-dependency", "999"),
        ]);
        assert!(!satisfies_all(&mixed, &lookup));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let lookup = lookup();
        let constraint = VersionConstraint::at_least("10");
        let first = satisfies("totally-real-dependency", &constraint, &lookup);
        let second = satisfies("totally-real-dependency", &constraint, &lookup);
        assert_eq!(first, second);
    }
}
