//! Rule-level verdicts and their report text.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use crate::events::Event;

/// Priority shown in violation reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Outcome of evaluating one rule against one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    priority: Priority,
    checked: usize,
    violation_count: usize,
    events: Vec<Event>,
}

impl Verdict {
    /// Creates a verdict from the events of one evaluation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        name: Option<String>,
        priority: Priority,
        checked: usize,
        events: Vec<Event>,
    ) -> Self {
        let violation_count = events.iter().filter(|e| e.is_violation()).count();
        Self {
            rule: rule.into(),
            name,
            priority,
            checked,
            violation_count,
            events,
        }
    }

    /// Returns the rule description.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns the rule name, if the rule was named.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the effective priority.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns how many elements were selected and checked.
    #[must_use]
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Returns all events in selection order, then emission order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the violated events.
    pub fn violations(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.is_violation())
    }

    /// Returns the number of violated events.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violation_count
    }

    /// Returns true if no event is a violation.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violation_count == 0
    }

    /// Renders the report.
    ///
    /// ```text
    /// Architecture Violation [Priority: MEDIUM] - Rule '<rule>' was violated (2 times):
    /// <message 1>
    /// <message 2>
    /// ```
    ///
    /// A passing verdict renders as `Rule '<rule>' was not violated`.
    #[must_use]
    pub fn report(&self) -> String {
        if self.passed() {
            return format!("Rule '{}' was not violated", self.rule);
        }
        let mut report = format!(
            "Architecture Violation [Priority: {}] - Rule '{}' was violated ({} times):",
            self.priority, self.rule, self.violation_count
        );
        for event in self.violations() {
            let _ = write!(report, "\n{}", event.message());
        }
        report
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}
