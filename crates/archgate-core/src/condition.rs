//! Per-element conditions and their combinators.
//!
//! A condition inspects one selected element, may walk the model's edges,
//! and reports its findings as [`ConditionEvents`]. Silence means the element
//! conforms.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::events::{ConditionEvents, Event, Outcome, Subject};
use crate::kind::{Classes, Kind};
use crate::model::{CodeModel, Element, ModelInconsistency};
use crate::predicate::Predicate;

type CheckFn =
    dyn Fn(&Element, &dyn CodeModel, &mut ConditionEvents) -> Result<(), ModelInconsistency>
        + Send
        + Sync;

/// A described check over one element of kind `K`.
pub struct Condition<K> {
    description: String,
    check: Arc<CheckFn>,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for Condition<K> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            check: Arc::clone(&self.check),
            kind: PhantomData,
        }
    }
}

impl<K> fmt::Debug for Condition<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<K: Kind> Condition<K> {
    /// Creates a condition from a description and a check.
    #[must_use]
    pub fn new<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Element, &dyn CodeModel, &mut ConditionEvents) -> Result<(), ModelInconsistency>
            + Send
            + Sync
            + 'static,
    {
        Self {
            description: description.into(),
            check: Arc::new(check),
            kind: PhantomData,
        }
    }

    /// Returns the description used in rule text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Checks one element, appending events.
    ///
    /// # Errors
    ///
    /// Returns [`ModelInconsistency`] if the model contradicts itself.
    pub fn check(
        &self,
        element: &Element,
        model: &dyn CodeModel,
        events: &mut ConditionEvents,
    ) -> Result<(), ModelInconsistency> {
        (self.check)(element, model, events)
    }

    /// Runs both conditions and keeps all their events.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let description = format!("{} and {}", self.description, other.description);
        Self::new(description, move |element, model, events| {
            self.check(element, model, events)?;
            other.check(element, model, events)
        })
    }

    /// Passes a subject unless both conditions violate it.
    ///
    /// Events are merged per subject. A subject violated by both branches
    /// yields one event joining both messages with ` and `. Otherwise the
    /// first satisfied message is kept, and a subject nobody satisfied
    /// explicitly stays silent.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let description = format!("{} or {}", self.description, other.description);
        Self::new(description, move |element, model, events| {
            let mut left = ConditionEvents::new();
            let mut right = ConditionEvents::new();
            self.check(element, model, &mut left)?;
            other.check(element, model, &mut right)?;
            events.extend(merge_alternatives(&[left, right]));
            Ok(())
        })
    }

    /// Replaces the description.
    #[must_use]
    pub fn as_(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Inverts every outcome of `condition`, keeping subjects and messages.
#[must_use]
pub fn never<K: Kind>(condition: Condition<K>) -> Condition<K> {
    let description = format!("not {}", condition.description);
    Condition::new(description, move |element, model, events| {
        let mut inner = ConditionEvents::new();
        condition.check(element, model, &mut inner)?;
        events.extend(inner.into_iter().map(Event::flipped));
        Ok(())
    })
}

/// Merges the events of alternative branches per subject.
fn merge_alternatives(branches: &[ConditionEvents]) -> Vec<Event> {
    let mut subjects: Vec<Subject> = Vec::new();
    for event in branches.iter().flat_map(ConditionEvents::events) {
        if !subjects.contains(&event.subject()) {
            subjects.push(event.subject());
        }
    }

    let mut merged = Vec::with_capacity(subjects.len());
    for subject in subjects {
        let mut violated_messages = Vec::new();
        let mut first_satisfied = None;
        let mut all_violated = true;

        for branch in branches {
            let mut about = branch.events().iter().filter(|e| e.subject() == subject);
            let violations: Vec<&str> = about
                .clone()
                .filter(|e| e.is_violation())
                .map(Event::message)
                .collect();
            if violations.is_empty() {
                all_violated = false;
                if first_satisfied.is_none() {
                    first_satisfied = about
                        .find(|e| e.outcome() == Outcome::Satisfied)
                        .map(Event::message);
                }
            } else {
                violated_messages.extend(violations);
            }
        }

        if all_violated {
            merged.push(Event::new(subject, Outcome::Violated, violated_messages.join(" and ")));
        } else if let Some(message) = first_satisfied {
            merged.push(Event::new(subject, Outcome::Satisfied, message));
        }
    }
    merged
}

/// Checks that a class depends on at least one class matching `predicate`.
///
/// Emits one satisfied event per matching outgoing edge, with the edge's
/// description as message. A class without such an edge gets one violated
/// event. Combined with [`never`] this reports every forbidden dependency.
#[must_use]
pub fn depend_on_classes_that(predicate: Predicate<Classes>) -> Condition<Classes> {
    let description = format!("depend on classes that {}", predicate.description());
    Condition::new(description, move |class, model, events| {
        let mut found = false;
        for dependency in model.direct_dependencies_from(class.id()) {
            let target_class = model.resolve(dependency.target_class())?;
            if !predicate.matches(target_class, model) {
                continue;
            }
            let origin = model.resolve(dependency.origin())?;
            let origin_class = model.resolve(dependency.origin_class())?;
            let target = model.resolve(dependency.target())?;
            events.satisfied(dependency.id(), dependency.describe(origin, origin_class, target));
            found = true;
        }
        if !found {
            events.violated(
                class.id(),
                format!(
                    "Class {} does not depend on classes that {}",
                    class.full_name(),
                    predicate.description()
                ),
            );
        }
        Ok(())
    })
}
