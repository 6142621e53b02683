//! Rule presets for common configurations.

use archgate_core::Rule;
use tracing::debug;

use crate::jpa::{
    JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR, LIFE_CYCLE_ANNOTATIONS_CORRECTLY_DECLARED,
};
use crate::spring::{
    REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES,
    REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_OR_CONTROLLER_CLASSES,
    REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES,
};
use crate::standard::{NO_CLASSES_SHOULD_USE_JAVA_UTIL_DATE, NO_CLASSES_SHOULD_USE_JUNIT_4};

/// Preset rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Standard rules: no JUnit 4, no `java.util.Date`.
    Standard,
    /// JPA entity rules.
    Jpa,
    /// Spring rules: transactional repository access and service-only layering.
    Spring,
    /// Every catalog rule.
    All,
}

impl Preset {
    /// Looks a preset up by its lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::Standard),
            "jpa" => Some(Self::Jpa),
            "spring" => Some(Self::Spring),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Returns the lowercase name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Jpa => "jpa",
            Self::Spring => "spring",
            Self::All => "all",
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<Rule> {
        let rules = match self {
            Self::Standard => standard_rules(),
            Self::Jpa => jpa_rules(),
            Self::Spring => spring_rules(),
            Self::All => all_rules(),
        };
        debug!("Preset {} provides {} rules", self.name(), rules.len());
        rules
    }
}

/// Returns the standard rules.
#[must_use]
pub fn standard_rules() -> Vec<Rule> {
    vec![
        NO_CLASSES_SHOULD_USE_JUNIT_4.clone(),
        NO_CLASSES_SHOULD_USE_JAVA_UTIL_DATE.clone(),
    ]
}

/// Returns the JPA rules.
#[must_use]
pub fn jpa_rules() -> Vec<Rule> {
    vec![
        JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR.clone(),
        LIFE_CYCLE_ANNOTATIONS_CORRECTLY_DECLARED.clone(),
    ]
}

/// Returns the Spring rules.
///
/// The service-or-controller variant is left out: it is a relaxed form of
/// the service-only rule and would report the same classes twice.
#[must_use]
pub fn spring_rules() -> Vec<Rule> {
    vec![
        REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES.clone(),
        REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES.clone(),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<Rule> {
    let mut rules = standard_rules();
    rules.extend(jpa_rules());
    rules.extend(spring_rules());
    rules.push(REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_OR_CONTROLLER_CLASSES.clone());
    rules
}
