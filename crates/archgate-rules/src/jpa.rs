//! Rules for JPA entities.
//!
//! | Name | Rule |
//! |------|------|
//! | `jpa-entities-have-public-empty-constructor` | `@Entity` classes need a public no-arg constructor |
//! | `jpa-life-cycle-annotations-correctly-declared` | lifecycle callbacks are `void` and parameterless |

use std::sync::LazyLock;

use archgate_core::{are_annotated_by_any, are_annotated_with, classes, methods, Rule};

use crate::markers::{ENTITY, LIFE_CYCLE_CALLBACKS};
use crate::standard::{BE_A_VOID_WITHOUT_PARAMETER, HAS_A_PUBLIC_EMPTY_CONSTRUCTOR};

/// Rule name of [`JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR`].
pub const ENTITY_CONSTRUCTOR_NAME: &str = "jpa-entities-have-public-empty-constructor";

/// Rule name of [`LIFE_CYCLE_ANNOTATIONS_CORRECTLY_DECLARED`].
pub const LIFE_CYCLE_NAME: &str = "jpa-life-cycle-annotations-correctly-declared";

/// Every `@Entity` class has a public zero-argument constructor.
///
/// The persistence provider instantiates entities reflectively. An implicit
/// constructor counts when the class itself is public.
pub static JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR: LazyLock<Rule> = LazyLock::new(|| {
    classes()
        .that(are_annotated_with(ENTITY))
        .should(HAS_A_PUBLIC_EMPTY_CONSTRUCTOR.clone())
        .named(ENTITY_CONSTRUCTOR_NAME)
});

/// Methods annotated with `@PrePersist`, `@PreUpdate`, `@PostPersist` or
/// `@PostUpdate` return `void` and take no parameters.
pub static LIFE_CYCLE_ANNOTATIONS_CORRECTLY_DECLARED: LazyLock<Rule> = LazyLock::new(|| {
    methods()
        .that(are_annotated_by_any(LIFE_CYCLE_CALLBACKS))
        .should(BE_A_VOID_WITHOUT_PARAMETER.clone())
        .named(LIFE_CYCLE_NAME)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(
            JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR.description(),
            "classes that are annotated with @Entity should have a public empty constructor"
        );
        assert_eq!(
            LIFE_CYCLE_ANNOTATIONS_CORRECTLY_DECLARED.description(),
            "methods that are annotated with PrePersist or PreUpdate or PostPersist or PostUpdate \
             should be a void without any parameter"
        );
        assert_eq!(LIFE_CYCLE_ANNOTATIONS_CORRECTLY_DECLARED.name(), Some(LIFE_CYCLE_NAME));
    }
}
