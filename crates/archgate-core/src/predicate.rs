//! Structural predicates used to select elements.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::kind::Kind;
use crate::model::{CodeModel, Element};
use crate::utils::packages::{package_matches, simple_name};

type MatchFn = dyn Fn(&Element, &dyn CodeModel) -> bool + Send + Sync;

/// A described boolean test over one element of kind `K`.
///
/// Predicates are immutable and cheap to clone; the test itself is shared.
pub struct Predicate<K> {
    description: String,
    matcher: Arc<MatchFn>,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for Predicate<K> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            matcher: Arc::clone(&self.matcher),
            kind: PhantomData,
        }
    }
}

impl<K> fmt::Debug for Predicate<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<K: Kind> Predicate<K> {
    /// Creates a predicate from a description and a test.
    #[must_use]
    pub fn new<F>(description: impl Into<String>, matcher: F) -> Self
    where
        F: Fn(&Element, &dyn CodeModel) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            matcher: Arc::new(matcher),
            kind: PhantomData,
        }
    }

    /// Returns the description used in rule text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tests an element.
    #[must_use]
    pub fn matches(&self, element: &Element, model: &dyn CodeModel) -> bool {
        (self.matcher)(element, model)
    }

    /// Both predicates must match.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let description = format!("{} and {}", self.description, other.description);
        Self::new(description, move |e, m| self.matches(e, m) && other.matches(e, m))
    }

    /// Either predicate must match.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let description = format!("{} or {}", self.description, other.description);
        Self::new(description, move |e, m| self.matches(e, m) || other.matches(e, m))
    }

    /// Negates the predicate.
    #[must_use]
    pub fn not(self) -> Self {
        let description = format!("not {}", self.description);
        Self::new(description, move |e, m| !self.matches(e, m))
    }

    /// Replaces the description.
    #[must_use]
    pub fn as_(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Matches elements directly annotated with `annotation`.
#[must_use]
pub fn are_annotated_with<K: Kind>(annotation: &str) -> Predicate<K> {
    let annotation = annotation.to_string();
    Predicate::new(
        format!("are annotated with @{}", simple_name(&annotation)),
        move |element, model| model.is_annotated_with(element, &annotation),
    )
}

/// Matches elements annotated with `annotation` directly or through annotation types.
#[must_use]
pub fn are_meta_annotated_with<K: Kind>(annotation: &str) -> Predicate<K> {
    let annotation = annotation.to_string();
    Predicate::new(
        format!("are meta-annotated with @{}", simple_name(&annotation)),
        move |element, model| model.is_meta_annotated_with(element, &annotation),
    )
}

/// Matches elements directly annotated with any of `annotations`.
#[must_use]
pub fn are_annotated_by_any<K: Kind>(annotations: &[&str]) -> Predicate<K> {
    let names: Vec<&str> = annotations.iter().map(|a| simple_name(a)).collect();
    let annotations: Vec<String> = annotations.iter().map(ToString::to_string).collect();
    Predicate::new(
        format!("are annotated with {}", names.join(" or ")),
        move |element, model| {
            annotations
                .iter()
                .any(|annotation| model.is_annotated_with(element, annotation))
        },
    )
}

/// Matches elements whose package (or owner's package) matches `pattern`.
///
/// `..` stands for any number of package segments and `*` for exactly one.
#[must_use]
pub fn reside_in_a_package<K: Kind>(pattern: &str) -> Predicate<K> {
    let pattern = pattern.to_string();
    Predicate::new(
        format!("reside in a package '{pattern}'"),
        move |element, _| package_matches(element.package(), &pattern),
    )
}

/// Matches the element whose full name is `type_name`.
#[must_use]
pub fn are_of_type<K: Kind>(type_name: &str) -> Predicate<K> {
    let type_name = type_name.to_string();
    Predicate::new(format!("are of type {type_name}"), move |element, _| {
        element.full_name() == type_name
    })
}
