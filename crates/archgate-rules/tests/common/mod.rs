//! Shared fixture models for catalog rule tests.

#![allow(dead_code)]

use archgate_core::{ClassDecl, InMemoryModel, MemberDecl, ModelBuilder, Visibility};
use archgate_rules::markers::{
    CONTROLLER, ENTITY, JAVA_UTIL_DATE, POST_PERSIST, POST_UPDATE, PRE_PERSIST, PRE_UPDATE,
    REPOSITORY, REST_CONTROLLER, SERVICE, TRANSACTIONAL,
};

pub const FIXTURES: &str = "io.github.archgate.fixtures";

/// Fully qualified name of a fixture class.
pub fn fqn(simple: &str) -> String {
    format!("{FIXTURES}.{simple}")
}

pub fn build(classes: impl IntoIterator<Item = ClassDecl>) -> InMemoryModel {
    ModelBuilder::new()
        .classes(classes)
        .build()
        .expect("fixture model should build")
}

// ── Spring: transactional access ──

fn test_repository() -> ClassDecl {
    ClassDecl::interface(fqn("TestRepository"))
        .annotated_with(REPOSITORY)
        .method(MemberDecl::method("doSomethingWithDatabase"))
        .method(
            MemberDecl::method("doSomethingWithDefault")
                .calls_method(fqn("TestRepository"), "doSomethingWithDatabase", &[]),
        )
}

/// A repository plus an unannotated service calling it with and without `@Transactional`.
pub fn service_with_mixed_transactions() -> InMemoryModel {
    let repository = fqn("TestRepository");
    build([
        test_repository(),
        ClassDecl::class(fqn("TestService"))
            .source_file("TestService.java")
            .field(MemberDecl::field("repository", &repository).visibility(Visibility::Private))
            .constructor(
                MemberDecl::constructor()
                    .parameter(&repository)
                    .accesses_field(fqn("TestService"), "repository"),
            )
            .method(
                MemberDecl::method("callRepositoryWithTransactional")
                    .annotated_with(TRANSACTIONAL)
                    .calls_method(&repository, "doSomethingWithDatabase", &[]),
            )
            .method(
                MemberDecl::method("callRepositoryWithoutTransactional")
                    .calls_method(&repository, "doSomethingWithDatabase", &[]),
            ),
    ])
}

/// A repository called from a class annotated `@Transactional`.
pub fn transactional_service() -> InMemoryModel {
    let repository = fqn("TestRepository");
    build([
        test_repository(),
        ClassDecl::class(fqn("TestTransactionalService"))
            .annotated_with(TRANSACTIONAL)
            .field(MemberDecl::field("repository", &repository).visibility(Visibility::Private))
            .constructor(MemberDecl::constructor().parameter(&repository))
            .method(
                MemberDecl::method("callRepository")
                    .calls_method(&repository, "doSomethingWithDatabase", &[]),
            ),
    ])
}

// ── Spring: layering ──

fn valid_repository() -> ClassDecl {
    ClassDecl::class(fqn("AValidTestRepository")).annotated_with(REPOSITORY)
}

/// A class holding the valid repository in a field and a constructor parameter.
fn holder(simple: &str) -> ClassDecl {
    let repository = fqn("AValidTestRepository");
    ClassDecl::class(fqn(simple))
        .field(MemberDecl::field("repository", &repository).visibility(Visibility::Private))
        .constructor(
            MemberDecl::constructor()
                .parameter(&repository)
                .accesses_field(fqn(simple), "repository"),
        )
}

/// The valid repository plus one holder of it, optionally annotated.
pub fn repository_held_by(simple: &str, annotation: Option<&str>) -> InMemoryModel {
    let mut holder = holder(simple);
    if let Some(annotation) = annotation {
        holder = holder.annotated_with(annotation);
    }
    build([
        ClassDecl::annotation_type(CONTROLLER),
        ClassDecl::annotation_type(REST_CONTROLLER).annotated_with(CONTROLLER),
        valid_repository(),
        holder,
    ])
}

/// The valid repository held by a service.
pub fn valid_service() -> InMemoryModel {
    repository_held_by("AValidTestService", Some(SERVICE))
}

/// The valid repository held by a controller.
pub fn controller() -> InMemoryModel {
    repository_held_by("ATestControllerWithRepository", Some(CONTROLLER))
}

/// The valid repository held by a REST controller, a stereotype of `@Controller`.
pub fn rest_controller() -> InMemoryModel {
    repository_held_by("ATestRestControllerWithRepository", Some(REST_CONTROLLER))
}

/// The valid repository held by a plain class.
pub fn standard_class() -> InMemoryModel {
    repository_held_by("AStandardClassWithRepository", None)
}

/// The valid repository held by another repository.
pub fn repository_containing_repository() -> InMemoryModel {
    repository_held_by("AnInvalidTestRepositoryContainingRepository", Some(REPOSITORY))
}

// ── JPA ──

/// A `void`, parameterless lifecycle callback.
fn callback(name: &str, marker: &str, visibility: Visibility) -> MemberDecl {
    MemberDecl::method(name).annotated_with(marker).visibility(visibility)
}

pub fn entity_with_explicit_public_empty_constructor() -> InMemoryModel {
    build([ClassDecl::class(fqn("TestEntityWithExplicitPublicEmptyConstructor"))
        .annotated_with(ENTITY)
        .constructor(MemberDecl::constructor())
        .method(callback("prePersist1", PRE_PERSIST, Visibility::Private))
        .method(callback("prePersist2", PRE_PERSIST, Visibility::Package))
        .method(callback("prePersist3", PRE_PERSIST, Visibility::Protected))
        .method(callback("prePersist4", PRE_PERSIST, Visibility::Public))])
}

pub fn entity_with_implicit_public_empty_constructor() -> InMemoryModel {
    build([ClassDecl::class(fqn("TestEntityWithImplicitPublicEmptyConstructor"))
        .annotated_with(ENTITY)
        .field(MemberDecl::field("name", "java.lang.String").visibility(Visibility::Private))])
}

pub fn entity_with_public_arged_constructor() -> InMemoryModel {
    build([ClassDecl::class(fqn("TestEntityWithPublicArgedConstructor"))
        .annotated_with(ENTITY)
        .constructor(MemberDecl::constructor().parameter("java.lang.String"))])
}

pub fn entity_with_correct_life_cycle() -> InMemoryModel {
    build([ClassDecl::class(fqn("TestEntityCorrectLifeCycle"))
        .annotated_with(ENTITY)
        .constructor(MemberDecl::constructor())
        .method(callback("prePersist", PRE_PERSIST, Visibility::Private))
        .method(callback("preUpdate", PRE_UPDATE, Visibility::Package))
        .method(callback("postPersist", POST_PERSIST, Visibility::Protected))
        .method(callback("postUpdate", POST_UPDATE, Visibility::Public))])
}

pub fn entity_with_life_cycle_return_type() -> InMemoryModel {
    build([ClassDecl::class(fqn("TestEntityIncorrectLifeCycleReturnType"))
        .annotated_with(ENTITY)
        .constructor(MemberDecl::constructor())
        .method(
            MemberDecl::method("prePersist")
                .annotated_with(PRE_PERSIST)
                .visibility(Visibility::Private)
                .returns("java.lang.String"),
        )])
}

pub fn entity_with_life_cycle_arguments() -> InMemoryModel {
    build([ClassDecl::class(fqn("TestEntityIncorrectLifeCycleArguments"))
        .annotated_with(ENTITY)
        .constructor(MemberDecl::constructor())
        .method(
            MemberDecl::method("prePersist")
                .annotated_with(PRE_PERSIST)
                .visibility(Visibility::Private)
                .parameter("int"),
        )])
}

// ── Standard ──

/// A class with a `java.util.Date` constant initialized by `new Date()`.
pub fn date_example() -> InMemoryModel {
    build([ClassDecl::class(fqn("DateExample"))
        .source_file("DateExample.java")
        .field(
            MemberDecl::field("A_DATE", JAVA_UTIL_DATE)
                .visibility(Visibility::Private)
                .static_(),
        )
        .constructor(MemberDecl::constructor().calls_constructor(JAVA_UTIL_DATE, &[]))])
}

pub fn local_date_example() -> InMemoryModel {
    build([ClassDecl::class(fqn("LocalDateExample"))
        .field(
            MemberDecl::field("A_DATE", "java.time.LocalDate")
                .visibility(Visibility::Private)
                .static_(),
        )
        .constructor(MemberDecl::constructor().calls_method("java.time.LocalDate", "now", &[]))])
}

/// A test class written against JUnit 4 annotations.
pub fn junit_4_test() -> InMemoryModel {
    build([ClassDecl::class(fqn("JUnit4Test"))
        .method(MemberDecl::method("initAll").static_().annotated_with("org.junit.BeforeClass"))
        .method(MemberDecl::method("init").annotated_with("org.junit.Before"))
        .method(MemberDecl::method("test").annotated_with("org.junit.Test"))
        .method(MemberDecl::method("end").annotated_with("org.junit.After"))
        .method(MemberDecl::method("endAll").static_().annotated_with("org.junit.AfterClass"))])
}

/// A test class written against JUnit 5 (`org.junit.jupiter`, a sub-package).
pub fn junit_5_test() -> InMemoryModel {
    build([ClassDecl::class(fqn("JUnit5Test"))
        .method(MemberDecl::method("test").annotated_with("org.junit.jupiter.api.Test"))])
}
