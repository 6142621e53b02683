//! Errors raised while evaluating rules.

use miette::Diagnostic;
use thiserror::Error;

use crate::model::ModelInconsistency;

/// Failure of a single rule evaluation.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum EvaluationError {
    /// The selection was empty and the rule does not allow that.
    #[error(
        "Rule '{rule}' failed to check any {noun}. This means either that no {noun} have been \
         passed to the rule at all, or that no {noun} passed to the rule matched the `that()` clause."
    )]
    #[diagnostic(
        code(archgate::empty_selection),
        help(
            "call `allow_empty_should(true)` on the rule, set `allow_empty_should = true` in its \
             [rules.<name>] table, or set `fail_on_empty_should = false` in archgate.toml"
        )
    )]
    EmptySelection {
        /// Rule description.
        rule: String,
        /// Plural noun of the selected kind.
        noun: &'static str,
    },

    /// The rule was violated.
    #[error("{report}")]
    #[diagnostic(code(archgate::violated))]
    Violated {
        /// Rule description.
        rule: String,
        /// Number of violated events.
        count: usize,
        /// Full report text.
        report: String,
    },

    /// A condition could not interpret the code model.
    #[error("Rule '{rule}' could not be evaluated: {source}")]
    #[diagnostic(
        code(archgate::model_inconsistency),
        help(
            "the code model returned data this condition cannot interpret; check the model \
             builder"
        )
    )]
    ModelInconsistency {
        /// Rule description.
        rule: String,
        /// What was inconsistent.
        #[source]
        source: ModelInconsistency,
    },
}

impl EvaluationError {
    /// Returns the description of the rule that failed.
    #[must_use]
    pub fn rule(&self) -> &str {
        match self {
            Self::EmptySelection { rule, .. }
            | Self::Violated { rule, .. }
            | Self::ModelInconsistency { rule, .. } => rule,
        }
    }
}
