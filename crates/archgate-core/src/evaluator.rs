//! Evaluator running a set of rules against one code model.

use serde::Serialize;
use std::fmt::Write;
use tracing::{debug, info, warn};

use crate::config::{Config, RuleConfig};
use crate::error::EvaluationError;
use crate::model::CodeModel;
use crate::rule::Rule;
use crate::verdict::Verdict;

/// Builder for configuring an [`Evaluator`].
#[derive(Debug, Default)]
pub struct EvaluatorBuilder {
    rules: Vec<Rule>,
    config: Option<Config>,
}

impl EvaluatorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the evaluator.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple rules.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the evaluator.
    #[must_use]
    pub fn build(self) -> Evaluator {
        Evaluator {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Runs rules against a model and collects their verdicts.
///
/// Use [`Evaluator::builder()`] to construct an instance.
#[derive(Debug)]
pub struct Evaluator {
    rules: Vec<Rule>,
    config: Config,
}

impl Evaluator {
    /// Creates a new builder for configuring an evaluator.
    #[must_use]
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the configuration of a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }

    /// Evaluates every enabled rule.
    ///
    /// A rule that fails to evaluate is recorded in
    /// [`EvaluationResult::errors`] and does not stop the others.
    #[must_use]
    pub fn evaluate(&self, model: &dyn CodeModel) -> EvaluationResult {
        info!("Starting evaluation of {} rules", self.rules.len());

        let mut result = EvaluationResult::default();
        for rule in &self.rules {
            let key = rule.key();
            if !self.config.is_rule_enabled(&key) {
                debug!("Skipping disabled rule: {}", key);
                result.skipped.push(key);
                continue;
            }

            match rule.evaluate_with(model, &self.config) {
                Ok(verdict) => result.verdicts.push(verdict),
                Err(e) => {
                    warn!("Rule {} failed: {}", key, e);
                    result.errors.push(RuleFailure::new(key, &e));
                }
            }
        }

        info!(
            "Evaluation complete: {} violations in {} rules, {} errors",
            result.violation_count(),
            result.verdicts.len(),
            result.errors.len()
        );
        result
    }
}

/// A rule that could not produce a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    /// Rule name, or description for unnamed rules.
    pub rule: String,
    /// Diagnostic code of the error.
    pub code: Option<String>,
    /// Error message.
    pub message: String,
}

impl RuleFailure {
    fn new(rule: String, error: &EvaluationError) -> Self {
        use miette::Diagnostic;
        Self {
            rule,
            code: error.code().map(|c| c.to_string()),
            message: error.to_string(),
        }
    }
}

/// Verdicts and failures of one evaluator run.
#[derive(Debug, Default, Serialize)]
pub struct EvaluationResult {
    /// Verdicts of the rules that were evaluated, in registration order.
    pub verdicts: Vec<Verdict>,
    /// Rules that could not be evaluated.
    pub errors: Vec<RuleFailure>,
    /// Keys of rules skipped by configuration.
    pub skipped: Vec<String>,
}

impl EvaluationResult {
    /// Returns true if every evaluated rule passed and none failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty() && self.verdicts.iter().all(Verdict::passed)
    }

    /// Returns the total number of violated events.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.verdicts.iter().map(Verdict::violation_count).sum()
    }

    /// Returns the verdicts with at least one violation.
    pub fn failing(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| !v.passed())
    }

    /// Formats failures as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self) -> String {
        let failing: Vec<&Verdict> = self.failing().collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== archgate: {} violation(s) in {} rule(s) ===\n",
            self.violation_count(),
            failing.len()
        );

        for verdict in &failing {
            let _ = writeln!(report, "{}\n", verdict.report());
        }
        for failure in &self.errors {
            let _ = writeln!(report, "error [{}]: {}\n", failure.rule, failure.message);
        }

        let _ = writeln!(
            report,
            "Total: {} rule(s) evaluated, {} failed, {} error(s), {} skipped",
            self.verdicts.len(),
            failing.len(),
            self.errors.len(),
            self.skipped.len()
        );
        report
    }

    /// Serializes the result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::kind::Classes;
    use crate::model::{ClassDecl, InMemoryModel, ModelBuilder};
    use crate::rule::{classes, methods};

    fn model() -> InMemoryModel {
        ModelBuilder::new()
            .class(ClassDecl::class("a.One"))
            .class(ClassDecl::class("a.Two"))
            .build()
            .unwrap()
    }

    fn flag(name: &str) -> Rule {
        classes()
            .should(Condition::<Classes>::new("be flagged", |class, _, events| {
                events.violated(class.id(), format!("Class {} is flagged", class.full_name()));
                Ok(())
            }))
            .named(name)
    }

    fn pass(name: &str) -> Rule {
        classes()
            .should(Condition::<Classes>::new("exist", |_, _, _| Ok(())))
            .named(name)
    }

    #[test]
    fn test_builder() {
        let evaluator = Evaluator::builder().rule(flag("a")).rules([pass("b")]).build();
        assert_eq!(evaluator.rule_count(), 2);
        assert!(evaluator.config().fail_on_empty_should);
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let config = Config::parse("[rules.noisy]\nenabled = false").unwrap();
        let evaluator = Evaluator::builder()
            .rule(flag("noisy"))
            .rule(pass("quiet"))
            .config(config)
            .build();

        let result = evaluator.evaluate(&model());
        assert!(result.passed());
        assert_eq!(result.skipped, ["noisy"]);
        assert_eq!(result.verdicts.len(), 1);
        assert!(evaluator.rule_config("noisy").is_some());
    }

    #[test]
    fn test_errors_do_not_stop_other_rules() {
        let evaluator = Evaluator::builder()
            .rule(
                methods()
                    .should(Condition::new("be anything", |_, _, _| Ok(())))
                    .named("no-methods"),
            )
            .rule(flag("flag"))
            .build();

        let result = evaluator.evaluate(&model());
        assert!(!result.passed());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].rule, "no-methods");
        assert_eq!(result.errors[0].code.as_deref(), Some("archgate::empty_selection"));
        assert_eq!(result.violation_count(), 2);
    }

    #[test]
    fn test_format_test_report() {
        let result = Evaluator::builder()
            .rule(flag("flag"))
            .rule(pass("pass"))
            .build()
            .evaluate(&model());

        insta::assert_snapshot!(result.format_test_report().trim(), @r"
        === archgate: 2 violation(s) in 1 rule(s) ===

        Architecture Violation [Priority: MEDIUM] - Rule 'classes should be flagged' was violated (2 times):
        Class a.One is flagged
        Class a.Two is flagged

        Total: 2 rule(s) evaluated, 1 failed, 0 error(s), 0 skipped
        ");
    }

    #[test]
    fn test_to_json() {
        let result = Evaluator::builder().rule(flag("flag")).build().evaluate(&model());
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["verdicts"][0]["name"], "flag");
        assert_eq!(json["verdicts"][0]["priority"], "medium");
        assert_eq!(json["verdicts"][0]["violation_count"], 2);
        assert_eq!(json["verdicts"][0]["events"][1]["message"], "Class a.Two is flagged");
    }
}
