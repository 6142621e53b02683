//! General-purpose conditions and rules.
//!
//! | Name | Rule |
//! |------|------|
//! | `no-classes-should-use-junit-4` | no classes should depend on `org.junit` |
//! | `no-classes-should-use-java-util-date` | no classes should depend on `java.util.Date` |
//!
//! The conditions here are building blocks for the JPA and Spring catalogs.

use std::sync::LazyLock;

use archgate_core::utils::simple_name;
use archgate_core::{
    are_of_type, depend_on_classes_that, no_classes, reside_in_a_package, Classes, CodeModel,
    Condition, Element, ElementId, Methods, ModelInconsistency, Rule,
};

use crate::markers::{JAVA_UTIL_DATE, JUNIT_4_PACKAGE};

/// Rule name of [`NO_CLASSES_SHOULD_USE_JUNIT_4`].
pub const NO_JUNIT_4_NAME: &str = "no-classes-should-use-junit-4";

/// Rule name of [`NO_CLASSES_SHOULD_USE_JAVA_UTIL_DATE`].
pub const NO_JAVA_UTIL_DATE_NAME: &str = "no-classes-should-use-java-util-date";

/// Holds for classes depending on JUnit 4 (`org.junit`, sub-packages excluded).
pub static USE_JUNIT_4: LazyLock<Condition<Classes>> = LazyLock::new(|| {
    depend_on_classes_that(reside_in_a_package(JUNIT_4_PACKAGE)).as_("use JUnit 4")
});

/// No class may use JUnit 4.
///
/// JUnit 4 and 5 share annotation names, so the old version is easy to pick
/// by accident.
pub static NO_CLASSES_SHOULD_USE_JUNIT_4: LazyLock<Rule> = LazyLock::new(|| {
    no_classes()
        .should(USE_JUNIT_4.clone())
        .because("Use JUnit 5 instead")
        .named(NO_JUNIT_4_NAME)
});

/// Holds for classes depending on `java.util.Date`.
pub static USE_JAVA_UTIL_DATE: LazyLock<Condition<Classes>> = LazyLock::new(|| {
    depend_on_classes_that(are_of_type(JAVA_UTIL_DATE)).as_("use java.util.Date")
});

/// No class may use `java.util.Date`; every offending field, parameter,
/// return type and call is reported.
pub static NO_CLASSES_SHOULD_USE_JAVA_UTIL_DATE: LazyLock<Rule> = LazyLock::new(|| {
    no_classes()
        .should(USE_JAVA_UTIL_DATE.clone())
        .because("Use dates API in java.time instead")
        .named(NO_JAVA_UTIL_DATE_NAME)
});

/// Shared instance of [`have_a_public_empty_constructor`].
pub static HAS_A_PUBLIC_EMPTY_CONSTRUCTOR: LazyLock<Condition<Classes>> =
    LazyLock::new(have_a_public_empty_constructor);

/// Shared instance of [`be_a_void_without_parameter`].
pub static BE_A_VOID_WITHOUT_PARAMETER: LazyLock<Condition<Methods>> =
    LazyLock::new(be_a_void_without_parameter);

/// Requires a public zero-argument constructor, declared or implicit.
#[must_use]
pub fn have_a_public_empty_constructor() -> Condition<Classes> {
    Condition::new("have a public empty constructor", |class, model, events| {
        let public = model
            .try_get_zero_arg_constructor(class.id())
            .is_some_and(|constructor| constructor.is_public());
        if !public {
            events.violated(
                class.id(),
                format!("Class {} has no public empty constructor", class.full_name()),
            );
        }
        Ok(())
    })
}

/// Requires methods to return `void` and take no parameters.
///
/// Each broken aspect is reported separately, so a method returning a value
/// and taking parameters yields two violations.
#[must_use]
pub fn be_a_void_without_parameter() -> Condition<Methods> {
    Condition::new("be a void without any parameter", |method, _, events| {
        let return_type = method.return_type().unwrap_or("void");
        if return_type != "void" {
            events.violated(
                method.id(),
                format!(
                    "Method {} is not a void but returns a {return_type}",
                    method.full_name()
                ),
            );
        }
        if !method.parameters().is_empty() {
            events.violated(
                method.id(),
                format!(
                    "Method {} should be without any parameter but has {} parameter(s)",
                    method.full_name(),
                    method.parameters().len()
                ),
            );
        }
        Ok(())
    })
}

/// Requires every class depending on the subject to be meta-annotated with `annotation`.
///
/// Dependent classes are reported once each, in the order their first
/// dependency appears.
#[must_use]
pub fn be_accessed_only_by_classes_meta_annotated_by(annotation: &str) -> Condition<Classes> {
    let annotation = annotation.to_string();
    let label = format!("@{}", simple_name(&annotation));
    Condition::new(format!("be called by {label} classes"), move |class, model, events| {
        for origin in dependent_classes(model, class.id())? {
            if !model.is_meta_annotated_with(origin, &annotation) {
                events.violated(
                    origin.id(),
                    format!("Class {} is not annotated by {label}", origin.full_name()),
                );
            }
        }
        Ok(())
    })
}

/// Like [`be_accessed_only_by_classes_meta_annotated_by`], accepting any of `annotations`.
#[must_use]
pub fn be_accessed_only_by_classes_meta_annotated_by_any(
    annotations: &[&str],
) -> Condition<Classes> {
    let labels = annotations
        .iter()
        .map(|a| format!("@{}", simple_name(a)))
        .collect::<Vec<_>>()
        .join(" or ");
    let annotations: Vec<String> = annotations.iter().map(ToString::to_string).collect();
    Condition::new(format!("be called by {labels} classes"), move |class, model, events| {
        for origin in dependent_classes(model, class.id())? {
            if !annotations.iter().any(|a| model.is_meta_annotated_with(origin, a)) {
                events.violated(
                    origin.id(),
                    format!("Class {} is annotated neither by {labels}", origin.full_name()),
                );
            }
        }
        Ok(())
    })
}

/// Distinct classes with a direct dependency into `class`, in first-seen order.
fn dependent_classes(
    model: &dyn CodeModel,
    class: ElementId,
) -> Result<Vec<&Element>, ModelInconsistency> {
    let mut origins: Vec<&Element> = Vec::new();
    for dependency in model.direct_dependencies_into(class) {
        let origin = model.resolve(dependency.origin_class())?;
        if !origins.iter().any(|known| known.id() == origin.id()) {
            origins.push(origin);
        }
    }
    Ok(origins)
}

/// Requires every call touching the subject to happen under `marker`.
///
/// Calls made by the subject and calls into it are checked in that order,
/// one event per call. A call passes if it comes from the subject itself, or
/// if its calling method or that method's class carries `marker` directly.
///
/// Only call edges present in the model are observed. Calls dispatched
/// through inherited methods or proxies that never materialize as edges
/// cannot be verified.
#[must_use]
pub fn be_accessed_by_classes_or_methods_annotated_with(marker: &str) -> Condition<Classes> {
    let marker = marker.to_string();
    let label = format!("@{}", simple_name(&marker));
    Condition::new(
        format!("be accessed by {label} classes or methods"),
        move |class, model, events| {
            let calls = model
                .call_edges_from_self(class.id())
                .into_iter()
                .chain(model.call_edges_to_self(class.id()));
            for call in calls {
                let origin = model.resolve(call.origin())?;
                if !origin.kind().is_code_unit() {
                    return Err(ModelInconsistency::NotACodeUnit {
                        edge: call.id(),
                        origin: origin.to_string(),
                    });
                }
                let origin_class = model.owner_of(origin)?;

                if origin_class.id() == class.id() {
                    events.satisfied(
                        call.id(),
                        format!("Method {} is in the same class", origin.full_name()),
                    );
                } else if model.is_annotated_with(origin, &marker) {
                    events.satisfied(
                        call.id(),
                        format!("Method {} is {label}", origin.full_name()),
                    );
                } else if model.is_annotated_with(origin_class, &marker) {
                    events.satisfied(
                        call.id(),
                        format!("Class {} is {label}", origin_class.full_name()),
                    );
                } else {
                    events.violated(
                        call.id(),
                        format!(
                            "Neither Class {} or Method {} are annotated by {label}",
                            origin_class.full_name(),
                            origin.full_name()
                        ),
                    );
                }
            }
            Ok(())
        },
    )
}
