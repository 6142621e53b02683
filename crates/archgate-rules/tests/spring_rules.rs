//! Integration test: Spring catalog rules against fixture models.

mod common;

use archgate_core::{
    ClassDecl, CodeModel, Dependency, Element, ElementId, EvaluationError, Evaluator,
    InMemoryModel, MemberDecl, ModelInconsistency, Outcome, Rule,
};
use archgate_rules::markers::{REPOSITORY, TRANSACTIONAL};
use archgate_rules::spring::{
    REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES,
    REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_OR_CONTROLLER_CLASSES,
    REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES, SERVICE_ACCESS_NAME,
    TRANSACTIONAL_ACCESS_NAME,
};
use common::{build, fqn};

fn strict(rule: &Rule) -> Rule {
    rule.clone().allow_empty_should(false)
}

fn violation_report(rule: &Rule, model: &InMemoryModel) -> String {
    match strict(rule).check(model) {
        Err(EvaluationError::Violated { report, .. }) => report,
        other => panic!("expected a violation, got {other:?}"),
    }
}

// ── Transactional access ──

#[test]
fn transactional_rule_reports_the_unannotated_caller() {
    let model = common::service_with_mixed_transactions();
    let report = violation_report(
        &REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES,
        &model,
    );

    assert!(report.contains(
        "Rule 'classes that are annotated with @Repository should be accessed by @Transactional \
         classes or methods' was violated (1 times)"
    ));
    assert!(report.contains(&format!(
        "Neither Class {service} or Method {service}.callRepositoryWithoutTransactional() \
         are annotated by @Transactional",
        service = fqn("TestService")
    )));
}

#[test]
fn transactional_rule_accepts_annotated_methods_and_same_class_calls() {
    let model = common::service_with_mixed_transactions();
    let verdict = strict(&REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES)
        .evaluate(&model)
        .expect("rule should evaluate");

    let satisfied: Vec<&str> = verdict
        .events()
        .iter()
        .filter(|e| e.outcome() == Outcome::Satisfied)
        .map(|e| e.message())
        .collect();
    let same_class = format!(
        "Method {}.doSomethingWithDefault() is in the same class",
        fqn("TestRepository")
    );
    // The self call is seen once leaving the repository and once entering it.
    assert_eq!(satisfied.iter().filter(|m| **m == same_class).count(), 2);
    assert!(satisfied.contains(
        &format!(
            "Method {}.callRepositoryWithTransactional() is @Transactional",
            fqn("TestService")
        )
        .as_str()
    ));
}

#[test]
fn transactional_rule_accepts_transactional_classes() {
    let model = common::transactional_service();
    strict(&REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES)
        .check(&model)
        .expect("a @Transactional class may call repositories");
}

fn unsafe_caller(transactional: bool) -> InMemoryModel {
    let mut caller = ClassDecl::class("app.S")
        .method(MemberDecl::method("useUnsafe").calls_method("app.R", "op", &[]));
    if transactional {
        caller = caller.annotated_with(TRANSACTIONAL);
    }
    build([
        ClassDecl::interface("app.R")
            .annotated_with(REPOSITORY)
            .method(MemberDecl::method("op")),
        caller,
    ])
}

#[test]
fn unannotated_caller_is_reported_exactly_once() {
    let verdict = REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES
        .evaluate(&unsafe_caller(false))
        .expect("rule should evaluate");

    insta::assert_snapshot!(verdict.report(), @"
    Architecture Violation [Priority: MEDIUM] - Rule 'classes that are annotated with @Repository should be accessed by @Transactional classes or methods' was violated (1 times):
    Neither Class app.S or Method app.S.useUnsafe() are annotated by @Transactional
    ");
}

#[test]
fn transactional_caller_class_passes() {
    let verdict = REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES
        .evaluate(&unsafe_caller(true))
        .expect("rule should evaluate");
    assert!(verdict.passed(), "{}", verdict.report());
    assert_eq!(
        verdict.events()[0].message(),
        "Class app.S is @Transactional"
    );
}

#[test]
fn repositories_without_callers_pass() {
    let model = build([ClassDecl::interface("app.R")
        .annotated_with(REPOSITORY)
        .method(MemberDecl::method("op"))]);
    let verdict = REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES
        .evaluate(&model)
        .expect("rule should evaluate");
    assert_eq!(verdict.checked(), 1);
    assert!(verdict.events().is_empty());
}

// ── Model inconsistency ──

/// A model that attributes `app.S.useUnsafe()` calls to the field `app.S.cache`.
struct FieldOriginatedCalls {
    inner: InMemoryModel,
    caller: ElementId,
    field: ElementId,
}

impl FieldOriginatedCalls {
    fn new() -> Self {
        let inner = build([
            ClassDecl::interface("app.R")
                .annotated_with(REPOSITORY)
                .method(MemberDecl::method("op")),
            ClassDecl::class("app.S")
                .field(MemberDecl::field("cache", "java.lang.String"))
                .method(MemberDecl::method("useUnsafe").calls_method("app.R", "op", &[])),
        ]);
        let caller = inner.find("app.S.useUnsafe()").expect("caller is declared").id();
        let field = inner.find("app.S.cache").expect("field is declared").id();
        Self {
            inner,
            caller,
            field,
        }
    }
}

impl CodeModel for FieldOriginatedCalls {
    fn element(&self, id: ElementId) -> Option<&Element> {
        let id = if id == self.caller { self.field } else { id };
        self.inner.element(id)
    }

    fn class_named(&self, full_name: &str) -> Option<&Element> {
        self.inner.class_named(full_name)
    }

    fn classes(&self) -> Vec<&Element> {
        self.inner.classes()
    }

    fn members_of(&self, class: ElementId) -> Vec<&Element> {
        self.inner.members_of(class)
    }

    fn dependencies(&self) -> &[Dependency] {
        self.inner.dependencies()
    }
}

#[test]
fn call_from_a_field_aborts_only_the_transactional_rule() {
    let model = FieldOriginatedCalls::new();

    let err = REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES
        .evaluate(&model)
        .expect_err("a field cannot make calls");
    match &err {
        EvaluationError::ModelInconsistency { source, .. } => {
            assert!(matches!(source, ModelInconsistency::NotACodeUnit { .. }));
        }
        other => panic!("expected a model inconsistency, got {other:?}"),
    }
    assert!(err.to_string().contains("originates from Field <app.S.cache>"), "{err}");

    let result = Evaluator::builder()
        .rule(REPOSITORIES_ARE_ACCESSED_ONLY_BY_TRANSACTIONAL_METHODS_OR_CLASSES.clone())
        .rule(REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES.clone())
        .build()
        .evaluate(&model);

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].rule, TRANSACTIONAL_ACCESS_NAME);
    assert_eq!(result.errors[0].code.as_deref(), Some("archgate::model_inconsistency"));
    assert_eq!(result.verdicts.len(), 1);
    assert_eq!(result.verdicts[0].name(), Some(SERVICE_ACCESS_NAME));
    assert_eq!(
        result.verdicts[0].violations().map(|e| e.message()).collect::<Vec<_>>(),
        ["Class app.S is not annotated by @Service"]
    );
}

// ── Service-only layering ──

#[test]
fn service_rule_accepts_services() {
    strict(&REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES)
        .check(&common::valid_service())
        .expect("services may hold repositories");
}

#[test]
fn service_rule_reports_other_holders() {
    for (model, holder) in [
        (common::controller(), "ATestControllerWithRepository"),
        (common::standard_class(), "AStandardClassWithRepository"),
        (
            common::repository_containing_repository(),
            "AnInvalidTestRepositoryContainingRepository",
        ),
    ] {
        let report = violation_report(&REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_CLASSES, &model);
        assert!(
            report.contains(
                "Rule 'classes that are annotated with @Repository should be called by @Service \
                 classes' was violated (1 times)"
            ),
            "{report}"
        );
        assert!(report.contains(&format!("Class {} is not annotated by @Service", fqn(holder))));
    }
}

// ── Service-or-controller layering ──

#[test]
fn service_or_controller_rule_accepts_either_stereotype() {
    for model in [common::valid_service(), common::controller(), common::rest_controller()] {
        strict(&REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_OR_CONTROLLER_CLASSES)
            .check(&model)
            .expect("services and controllers may hold repositories");
    }
}

#[test]
fn service_or_controller_rule_names_both_annotations() {
    for (model, holder) in [
        (common::standard_class(), "AStandardClassWithRepository"),
        (
            common::repository_containing_repository(),
            "AnInvalidTestRepositoryContainingRepository",
        ),
    ] {
        let report = violation_report(
            &REPOSITORIES_ARE_ACCESSED_ONLY_BY_SERVICE_OR_CONTROLLER_CLASSES,
            &model,
        );
        assert!(report.contains("was violated (1 times)"), "{report}");
        assert!(report.contains(&format!(
            "Class {} is annotated neither by @Service or @Controller",
            fqn(holder)
        )));
    }
}
