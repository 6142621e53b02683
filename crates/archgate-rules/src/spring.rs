//! Rules for Spring stereotypes and transaction boundaries.
//!
//! | Name | Rule |
//! |------|------|
//! | `spring-repositories-accessed-only-by-transactional-methods-or-classes` | repository calls happen inside `@Transactional` |
//! | `spring-repositories-accessed-only-by-service-classes` | only `@Service` classes use repositories |
//! | `spring-repositories-accessed-only-by-service-or-controller-classes` | only `@Service` or `@Controller` classes use repositories |

use std::sync::LazyLock;

use archgate_core::{are_annotated_with, classes, Classes, Condition, Rule};

use crate::markers::{CONTROLLER, REPOSITORY, SERVICE, TRANSACTIONAL};
use crate::standard::{
    be_accessed_by_classes_or_methods_annotated_with,
    be_accessed_only_by_classes_meta_annotated_by,
    be_accessed_only_by_classes_meta_annotated_by_any,
};

/// Rule name of [`REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES`].
pub const TRANSACTIONAL_ACCESS_NAME: &str =
    "spring-repositories-accessed-only-by-transactional-methods-or-classes";

/// Rule name of [`REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES`].
pub const SERVICE_ACCESS_NAME: &str = "spring-repositories-accessed-only-by-service-classes";

/// Rule name of [`REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_OR_CONTROLLER_CLASSES`].
pub const SERVICE_OR_CONTROLLER_ACCESS_NAME: &str =
    "spring-repositories-accessed-only-by-service-or-controller-classes";

/// Every call from or into the class happens in a `@Transactional` method or
/// class, or stays within the class.
///
/// With declarative transactions, a transaction (read-only or not) should be
/// open before any repository method runs. Calls dispatched through proxies
/// or inherited methods that leave no call edge in the model are not seen.
pub static BE_ACCESSED_BY_TRANSACTIONAL_CLASSES_OR_METHODS: LazyLock<Condition<Classes>> =
    LazyLock::new(|| be_accessed_by_classes_or_methods_annotated_with(TRANSACTIONAL));

/// `@Repository` classes are only called from `@Transactional` code.
pub static REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES: LazyLock<Rule> =
    LazyLock::new(|| {
        classes()
            .that(are_annotated_with(REPOSITORY))
            .should(BE_ACCESSED_BY_TRANSACTIONAL_CLASSES_OR_METHODS.clone())
            .named(TRANSACTIONAL_ACCESS_NAME)
    });

/// `@Repository` classes are only used by `@Service` classes.
pub static REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES: LazyLock<Rule> = LazyLock::new(|| {
    classes()
        .that(are_annotated_with(REPOSITORY))
        .should(be_accessed_only_by_classes_meta_annotated_by(SERVICE))
        .named(SERVICE_ACCESS_NAME)
});

/// `@Repository` classes are only used by `@Service` or `@Controller`
/// classes (including stereotypes meta-annotated with them, such as
/// `@RestController`).
pub static REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_OR_CONTROLLER_CLASSES: LazyLock<Rule> =
    LazyLock::new(|| {
        classes()
            .that(are_annotated_with(REPOSITORY))
            .should(be_accessed_only_by_classes_meta_annotated_by_any(&[SERVICE, CONTROLLER]))
            .named(SERVICE_OR_CONTROLLER_ACCESS_NAME)
    });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(
            REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES.description(),
            "classes that are annotated with @Repository should be accessed by @Transactional \
             classes or methods"
        );
        assert_eq!(
            REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES.description(),
            "classes that are annotated with @Repository should be called by @Service classes"
        );
        assert_eq!(
            REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_OR_CONTROLLER_CLASSES.description(),
            "classes that are annotated with @Repository should be called by @Service or \
             @Controller classes"
        );
    }
}
