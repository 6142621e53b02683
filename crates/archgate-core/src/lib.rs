//! # archgate-core
//!
//! Rule evaluation engine for architecture conformance checks over a static
//! code model.
//!
//! This crate provides:
//!
//! - [`CodeModel`] trait plus [`InMemoryModel`] built with [`ModelBuilder`]
//! - [`Predicate`] and [`Condition`], typed by element kind ([`Classes`], [`Methods`])
//! - the rule DSL ([`classes()`], [`no_classes()`], [`methods()`], [`no_methods()`])
//! - [`Verdict`] and its report text
//! - [`Evaluator`] for running rule sets under a [`Config`]
//!
//! ## Example
//!
//! ```
//! use archgate_core::{
//!     are_of_type, depend_on_classes_that, no_classes, ClassDecl, MemberDecl, ModelBuilder,
//! };
//!
//! let model = ModelBuilder::new()
//!     .class(ClassDecl::class("shop.Order").field(MemberDecl::field("placed", "java.util.Date")))
//!     .build()?;
//!
//! let rule = no_classes()
//!     .should(depend_on_classes_that(are_of_type("java.util.Date")).as_("use java.util.Date"));
//!
//! let verdict = rule.evaluate(&model)?;
//! assert_eq!(verdict.violation_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod condition;
mod config;
mod error;
mod evaluator;
mod events;
mod kind;
mod predicate;
mod rule;
mod verdict;

/// Code model trait, elements, edges and the in-memory implementation.
pub mod model;

/// Utility modules for predicate and condition implementations.
pub mod utils;

pub use condition::{depend_on_classes_that, never, Condition};
pub use config::{Config, ConfigError, RuleConfig, CONFIG_FILE_NAMES};
pub use error::EvaluationError;
pub use evaluator::{EvaluationResult, Evaluator, EvaluatorBuilder, RuleFailure};
pub use events::{ConditionEvents, Event, Outcome, Subject};
pub use kind::{Classes, Kind, Methods};
pub use model::{
    AccessDecl, Annotation, BuildError, ClassDecl, ClassFlavor, CodeModel, Dependency,
    DependencyKind, EdgeId, Element, ElementId, ElementKind, InMemoryModel, MemberDecl,
    ModelBuilder, ModelInconsistency, Visibility,
};
pub use predicate::{
    are_annotated_by_any, are_annotated_with, are_meta_annotated_with, are_of_type,
    reside_in_a_package, Predicate,
};
pub use rule::{classes, methods, no_classes, no_methods, Rule, Selection};
pub use verdict::{Priority, Verdict};
