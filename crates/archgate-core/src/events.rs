//! Events emitted by conditions.

use serde::Serialize;
use std::fmt;

use crate::model::{EdgeId, ElementId};

/// What an event is about: an element or a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Subject {
    /// A class or member.
    Element(ElementId),
    /// A dependency or call edge.
    Edge(EdgeId),
}

impl From<ElementId> for Subject {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

impl From<EdgeId> for Subject {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The subject conforms.
    Satisfied,
    /// The subject violates the condition.
    Violated,
}

impl Outcome {
    /// Returns the opposite outcome.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Satisfied => Self::Violated,
            Self::Violated => Self::Satisfied,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfied => write!(f, "SATISFIED"),
            Self::Violated => write!(f, "VIOLATED"),
        }
    }
}

/// One outcome with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    subject: Subject,
    outcome: Outcome,
    message: String,
}

impl Event {
    /// Creates an event.
    #[must_use]
    pub fn new(subject: impl Into<Subject>, outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            outcome,
            message: message.into(),
        }
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Returns the outcome.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if the outcome is [`Outcome::Violated`].
    #[must_use]
    pub fn is_violation(&self) -> bool {
        self.outcome == Outcome::Violated
    }

    /// Returns the same event with the opposite outcome.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        self.outcome = self.outcome.flipped();
        self
    }
}

/// Ordered events collected while checking elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConditionEvents {
    events: Vec<Event>,
}

impl ConditionEvents {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Appends a satisfied event.
    pub fn satisfied(&mut self, subject: impl Into<Subject>, message: impl Into<String>) {
        self.add(Event::new(subject, Outcome::Satisfied, message));
    }

    /// Appends a violated event.
    pub fn violated(&mut self, subject: impl Into<Subject>, message: impl Into<String>) {
        self.add(Event::new(subject, Outcome::Violated, message));
    }

    /// Returns all events in emission order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the violated events in emission order.
    pub fn violations(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.is_violation())
    }

    /// Returns the number of violated events.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations().count()
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no event was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consumes the collection.
    #[must_use]
    pub fn into_vec(self) -> Vec<Event> {
        self.events
    }
}

impl Extend<Event> for ConditionEvents {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl IntoIterator for ConditionEvents {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
