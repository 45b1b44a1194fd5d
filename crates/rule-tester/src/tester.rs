//! The rule-testing orchestrator.

use crate::config::{ConfigError, RuleTesterConfig};
use crate::constraints::satisfies_all;
use crate::filenames::derive_filename;
use crate::framework::{CaseBody, TestFramework};
use crate::plan::TestPlan;
use crate::verify::verify_case;
use rule_tester_core::{
    EffectiveCase, Expectation, InvalidTestCase, Rule, RuleRunner, TestCaseSpec, ValidTestCase,
    VersionLookup,
};
use std::sync::Arc;
use tracing::debug;

/// Name of the single case registered when constructor-level dependency
/// constraints are unsatisfied.
pub const ALL_SKIPPED_CASE_NAME: &str =
    "All tests skipped due to unsatisfied constructor dependency constraints";

/// Valid and invalid cases for one [`RuleTester::run`] call.
#[derive(Debug, Clone, Default)]
pub struct RunCases {
    /// Cases expected to produce no diagnostics.
    pub valid: Vec<ValidTestCase>,
    /// Cases expected to produce the declared diagnostics.
    pub invalid: Vec<InvalidTestCase>,
}

impl RunCases {
    /// Creates an empty set of cases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the valid cases.
    #[must_use]
    pub fn valid<I, C>(mut self, cases: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ValidTestCase>,
    {
        self.valid = cases.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the invalid cases.
    #[must_use]
    pub fn invalid(mut self, cases: impl IntoIterator<Item = InvalidTestCase>) -> Self {
        self.invalid = cases.into_iter().collect();
        self
    }
}

/// Runs a rule against a battery of valid/invalid source snippets.
///
/// Construction schedules exactly one parser-cache cleanup with the
/// framework's `after_all` hook; every `run` call on the same instance shares
/// that one hook. `run` registers named test closures with the framework and
/// never executes case bodies itself.
pub struct RuleTester<F: TestFramework> {
    config: RuleTesterConfig,
    runner: Arc<dyn RuleRunner>,
    versions: Arc<dyn VersionLookup>,
    framework: F,
}

impl RuleTester<TestPlan> {
    /// Creates a tester backed by the built-in collecting [`TestPlan`].
    #[must_use]
    pub fn with_plan(
        config: RuleTesterConfig,
        runner: Arc<dyn RuleRunner>,
        versions: Arc<dyn VersionLookup>,
    ) -> Self {
        Self::new(config, runner, versions, TestPlan::new())
    }
}

impl<F: TestFramework> RuleTester<F> {
    /// Creates a tester and schedules the one-shot parser-cache cleanup.
    ///
    /// The cleanup hook is registered here, unconditionally, whether or not
    /// [`run`](Self::run) is ever called.
    #[must_use]
    pub fn new(
        config: RuleTesterConfig,
        runner: Arc<dyn RuleRunner>,
        versions: Arc<dyn VersionLookup>,
        mut framework: F,
    ) -> Self {
        let cache_owner = Arc::clone(&runner);
        framework.after_all(Box::new(move || cache_owner.clear_caches()));

        Self {
            config,
            runner,
            versions,
            framework,
        }
    }

    /// Returns the tester's configuration.
    #[must_use]
    pub fn config(&self) -> &RuleTesterConfig {
        &self.config
    }

    /// Consumes the tester and returns the framework, so adapters that defer
    /// execution (like [`TestPlan`]) can be driven to completion.
    #[must_use]
    pub fn into_framework(self) -> F {
        self.framework
    }

    /// Registers all cases for one rule with the test framework.
    ///
    /// # Errors
    ///
    /// Fails fast, registering nothing, when a case conflicts with the
    /// tester-level parser identity, an invalid case declares no expected
    /// diagnostics, an expectation is unidentified, or an expected message id
    /// is not declared by the rule.
    pub fn run(
        &mut self,
        rule_name: &str,
        rule: Arc<dyn Rule>,
        cases: RunCases,
    ) -> Result<(), ConfigError> {
        self.validate(rule.as_ref(), &cases)?;

        // Constructor-level constraints gate the whole rule's registration.
        if let Some(constraints) = &self.config.dependency_constraints {
            if !constraints.is_empty() && !satisfies_all(constraints, self.versions.as_ref()) {
                debug!("Constructor dependency constraints unsatisfied; skipping `{rule_name}`");
                self.framework.describe_skip(
                    rule_name,
                    Box::new(|f| {
                        f.it(ALL_SKIPPED_CASE_NAME, Box::new(|| Ok(())));
                    }),
                );
                return Ok(());
            }
        }

        // Manual exclusivity overrides automatic skipping: a declared `only`
        // anywhere in the run suppresses dependency-based skips run-wide.
        let has_only =
            cases.valid.iter().any(ValidTestCase::is_only) || cases.invalid.iter().any(|c| c.spec.only);

        let RunCases { valid, invalid } = cases;
        let valid_cases: Vec<EffectiveCase> = valid
            .into_iter()
            .map(|case| self.resolve(case.into_spec(), Expectation::Valid, has_only))
            .collect();
        let invalid_cases: Vec<EffectiveCase> = invalid
            .into_iter()
            .map(|case| {
                let InvalidTestCase {
                    spec,
                    errors,
                    output,
                } = case;
                self.resolve(spec, Expectation::Invalid { errors, output }, has_only)
            })
            .collect();

        debug!(
            "Registering `{rule_name}`: {} valid, {} invalid case(s)",
            valid_cases.len(),
            invalid_cases.len()
        );

        let runner = Arc::clone(&self.runner);
        let rule_for_groups = Arc::clone(&rule);
        self.framework.describe(
            rule_name,
            Box::new(move |f| {
                if !valid_cases.is_empty() {
                    let runner = Arc::clone(&runner);
                    let rule = Arc::clone(&rule_for_groups);
                    f.describe(
                        "valid",
                        Box::new(move |f| {
                            for case in valid_cases {
                                register_case(f, Arc::clone(&runner), Arc::clone(&rule), case);
                            }
                        }),
                    );
                }
                if !invalid_cases.is_empty() {
                    f.describe(
                        "invalid",
                        Box::new(move |f| {
                            for case in invalid_cases {
                                register_case(
                                    f,
                                    Arc::clone(&runner),
                                    Arc::clone(&rule_for_groups),
                                    case,
                                );
                            }
                        }),
                    );
                }
            }),
        );

        Ok(())
    }

    /// Validates configuration coherence and case shape before anything is
    /// registered.
    fn validate(&self, rule: &dyn Rule, cases: &RunCases) -> Result<(), ConfigError> {
        if let Some(parser) = &self.config.parser {
            let case_parsers = cases
                .valid
                .iter()
                .filter_map(ValidTestCase::parser)
                .chain(cases.invalid.iter().filter_map(|c| c.spec.parser.as_deref()));
            for case_parser in case_parsers {
                if case_parser != parser {
                    return Err(ConfigError::TestLevelParser {
                        parser: parser.clone(),
                    });
                }
            }
        }

        for case in &cases.invalid {
            if case.errors.is_empty() {
                return Err(ConfigError::MissingErrors {
                    code: case.spec.code.clone(),
                });
            }
            for (index, expected) in case.errors.iter().enumerate() {
                if expected.is_unidentified() {
                    return Err(ConfigError::UnidentifiedExpectation {
                        code: case.spec.code.clone(),
                        index,
                    });
                }
                if let Some(message_id) = &expected.message_id {
                    if !rule.has_message(message_id) {
                        return Err(ConfigError::UnknownMessageId {
                            rule: rule.name().to_string(),
                            message_id: message_id.clone(),
                            known: rule
                                .meta()
                                .messages
                                .keys()
                                .cloned()
                                .collect::<Vec<_>>()
                                .join(", "),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolves a declared case to the effective form handed to the runner.
    fn resolve(
        &self,
        spec: TestCaseSpec,
        expectation: Expectation,
        suppress_skip: bool,
    ) -> EffectiveCase {
        let skip = !suppress_skip
            && match &spec.dependency_constraints {
                Some(constraints) if !constraints.is_empty() => {
                    !satisfies_all(constraints, self.versions.as_ref())
                }
                _ => false,
            };

        // Filename derivation never overwrites an explicit filename.
        // Case-level type-aware fields override the constructor config.
        let filename = spec.filename.clone().unwrap_or_else(|| {
            let case_options = spec.parser_options.as_ref();
            let config_options = self.config.parser_options.as_ref();
            let jsx = case_options
                .and_then(|o| o.ecma_features)
                .or_else(|| config_options.and_then(|o| o.ecma_features))
                .is_some_and(|f| f.jsx);
            let root_dir = case_options
                .and_then(|o| o.tsconfig_root_dir.as_deref())
                .or_else(|| config_options.and_then(|o| o.tsconfig_root_dir.as_deref()));
            derive_filename(jsx, &self.config.default_filenames, root_dir)
        });

        EffectiveCase {
            code: spec.code,
            filename,
            skip,
            only: spec.only,
            parser_options: spec.parser_options,
            dependency_constraints: spec.dependency_constraints,
            expectation,
        }
    }
}

/// Registers one resolved case with the framework. Execution is deferred to
/// whenever the adapter invokes the body.
fn register_case(
    f: &mut dyn TestFramework,
    runner: Arc<dyn RuleRunner>,
    rule: Arc<dyn Rule>,
    case: EffectiveCase,
) {
    let name = case.code.clone();
    let only = case.only;
    let skip = case.skip;
    let body: CaseBody = Box::new(move || {
        let result = runner.run_rule(rule.as_ref(), &case)?;
        verify_case(&case, &result)
    });

    if only {
        f.it_only(&name, body);
    } else if skip {
        f.it_skip(&name, body);
    } else {
        f.it(&name, body);
    }
}
