//! Rule DSL: bind a selection to a condition.
//!
//! ```
//! use archgate_core::{classes, are_annotated_with, Condition, Classes};
//!
//! let rule = classes()
//!     .that(are_annotated_with("jakarta.persistence.Entity"))
//!     .should(Condition::<Classes>::new("be entities", |_, _, _| Ok(())))
//!     .because("entities are loaded reflectively");
//!
//! assert_eq!(
//!     rule.description(),
//!     "classes that are annotated with @Entity should be entities, because entities are loaded reflectively"
//! );
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::condition::{never, Condition};
use crate::config::Config;
use crate::error::EvaluationError;
use crate::events::ConditionEvents;
use crate::kind::{Classes, Kind, Methods};
use crate::model::{CodeModel, ModelInconsistency};
use crate::predicate::Predicate;
use crate::verdict::{Priority, Verdict};

/// Starts a rule over all declared classes.
#[must_use]
pub fn classes() -> Selection<Classes> {
    Selection::new(false)
}

/// Starts a rule that no selected class may satisfy.
#[must_use]
pub fn no_classes() -> Selection<Classes> {
    Selection::new(true)
}

/// Starts a rule over the methods of declared classes.
#[must_use]
pub fn methods() -> Selection<Methods> {
    Selection::new(false)
}

/// Starts a rule that no selected method may satisfy.
#[must_use]
pub fn no_methods() -> Selection<Methods> {
    Selection::new(true)
}

/// Elements of kind `K`, optionally narrowed by predicates.
#[derive(Debug)]
pub struct Selection<K> {
    negated: bool,
    predicates: Vec<Predicate<K>>,
}

impl<K> Clone for Selection<K> {
    fn clone(&self) -> Self {
        Self {
            negated: self.negated,
            predicates: self.predicates.clone(),
        }
    }
}

impl<K: Kind> Selection<K> {
    fn new(negated: bool) -> Self {
        Self {
            negated,
            predicates: Vec::new(),
        }
    }

    /// Narrows the selection. Repeated calls are AND-ed.
    #[must_use]
    pub fn that(mut self, predicate: Predicate<K>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Binds the selection to a condition.
    ///
    /// For `no_classes()` and `no_methods()` the condition is negated while
    /// the description keeps its plain wording.
    #[must_use]
    pub fn should(self, condition: Condition<K>) -> Rule {
        let subject = if self.negated {
            format!("no {}", K::NOUN)
        } else {
            K::NOUN.to_string()
        };
        let mut description = subject;
        if !self.predicates.is_empty() {
            let narrowing: Vec<&str> = self.predicates.iter().map(Predicate::description).collect();
            description.push_str(" that ");
            description.push_str(&narrowing.join(" and "));
        }
        description.push_str(" should ");
        description.push_str(condition.description());

        let condition = if self.negated { never(condition) } else { condition };
        Rule {
            description,
            reason: None,
            name: None,
            priority: Priority::default(),
            allow_empty_should: None,
            body: Arc::new(Bound {
                predicates: self.predicates,
                condition,
            }),
        }
    }
}

/// Kind-erased evaluation of a bound selection and condition.
trait Evaluate: Send + Sync {
    fn noun(&self) -> &'static str;

    /// Returns the number of selected elements and their events.
    fn run(&self, model: &dyn CodeModel) -> Result<(usize, ConditionEvents), ModelInconsistency>;
}

struct Bound<K> {
    predicates: Vec<Predicate<K>>,
    condition: Condition<K>,
}

impl<K: Kind> Evaluate for Bound<K> {
    fn noun(&self) -> &'static str {
        K::NOUN
    }

    fn run(&self, model: &dyn CodeModel) -> Result<(usize, ConditionEvents), ModelInconsistency> {
        let mut events = ConditionEvents::new();
        let mut selected = 0;
        for element in K::select(model) {
            if !self.predicates.iter().all(|p| p.matches(element, model)) {
                continue;
            }
            selected += 1;
            self.condition.check(element, model, &mut events)?;
        }
        Ok((selected, events))
    }
}

/// An evaluable architecture rule.
///
/// Rules are immutable, cheap to clone and safe to evaluate from several
/// threads at once.
#[derive(Clone)]
pub struct Rule {
    description: String,
    reason: Option<String>,
    name: Option<String>,
    priority: Priority,
    allow_empty_should: Option<bool>,
    body: Arc<dyn Evaluate>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("description", &self.description())
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("allow_empty_should", &self.allow_empty_should)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Adds a rationale, rendered as `, because <reason>`.
    #[must_use]
    pub fn because(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Names the rule; the name keys its `[rules.<name>]` config table.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the generated description (the rationale is kept).
    #[must_use]
    pub fn as_(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority shown in reports.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Decides whether an empty selection passes, overriding any config.
    #[must_use]
    pub fn allow_empty_should(mut self, allow: bool) -> Self {
        self.allow_empty_should = Some(allow);
        self
    }

    /// Returns the full description, including the rationale.
    #[must_use]
    pub fn description(&self) -> String {
        match &self.reason {
            Some(reason) => format!("{}, because {reason}", self.description),
            None => self.description.clone(),
        }
    }

    /// Returns the rationale.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Returns the explicit name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the key used for config lookups: the name, or the description.
    #[must_use]
    pub fn key(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.description())
    }

    /// Returns the priority set on the rule.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Evaluates the rule with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::EmptySelection`] if nothing was selected and
    /// empty selections are not allowed, or
    /// [`EvaluationError::ModelInconsistency`] if a condition aborted.
    pub fn evaluate(&self, model: &dyn CodeModel) -> Result<Verdict, EvaluationError> {
        self.evaluate_with(model, &Config::default())
    }

    /// Evaluates the rule, applying overrides from `config`.
    ///
    /// The empty-selection policy is taken from the rule itself if set, then
    /// from the rule's config table, then from `fail_on_empty_should`. A
    /// configured priority replaces the rule's own.
    ///
    /// # Errors
    ///
    /// See [`Rule::evaluate`].
    pub fn evaluate_with(
        &self,
        model: &dyn CodeModel,
        config: &Config,
    ) -> Result<Verdict, EvaluationError> {
        let description = self.description();
        let key = self.key();

        let (checked, events) = self.body.run(model).map_err(|source| {
            warn!("Rule '{}' aborted: {}", description, source);
            EvaluationError::ModelInconsistency {
                rule: description.clone(),
                source,
            }
        })?;
        debug!("Rule '{}' selected {} {}", description, checked, self.body.noun());

        let allow_empty = self
            .allow_empty_should
            .or_else(|| config.allow_empty_should(&key))
            .unwrap_or(!config.fail_on_empty_should);
        if checked == 0 && !allow_empty {
            return Err(EvaluationError::EmptySelection {
                rule: description,
                noun: self.body.noun(),
            });
        }

        let priority = config.rule_priority(&key).unwrap_or(self.priority);
        Ok(Verdict::new(description, self.name.clone(), priority, checked, events.into_vec()))
    }

    /// Evaluates the rule and fails if it is violated.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::Violated`] carrying the report when any
    /// event is a violation, and the errors of [`Rule::evaluate`].
    pub fn check(&self, model: &dyn CodeModel) -> Result<(), EvaluationError> {
        self.check_with(model, &Config::default())
    }

    /// Like [`Rule::check`], applying overrides from `config`.
    ///
    /// # Errors
    ///
    /// See [`Rule::check`].
    pub fn check_with(
        &self,
        model: &dyn CodeModel,
        config: &Config,
    ) -> Result<(), EvaluationError> {
        let verdict = self.evaluate_with(model, config)?;
        if verdict.passed() {
            return Ok(());
        }
        Err(EvaluationError::Violated {
            rule: verdict.rule().to_string(),
            count: verdict.violation_count(),
            report: verdict.report(),
        })
    }
}
