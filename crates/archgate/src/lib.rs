//! # archgate
//!
//! Architecture conformance rules for test suites.
//!
//! This is the facade crate: it re-exports the evaluation engine and the
//! built-in rule catalog, and adds test helpers that panic with a readable
//! report.
//!
//! ## Quick Start
//!
//! ```toml
//! [dev-dependencies]
//! archgate = "0.1"
//! ```
//!
//! ```
//! use archgate::rules::jpa::JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR;
//! use archgate::rules::markers::ENTITY;
//! use archgate::{ClassDecl, ModelBuilder};
//!
//! let model = ModelBuilder::new()
//!     .class(ClassDecl::class("shop.Order").annotated_with(ENTITY))
//!     .build()
//!     .unwrap();
//!
//! archgate::assert_rule(&JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR, &model);
//! ```
//!
//! Rules are tuned via `archgate.toml` at the workspace root:
//!
//! ```toml
//! fail_on_empty_should = true
//!
//! [rules.no-classes-should-use-junit-4]
//! enabled = false
//! ```

#![forbid(unsafe_code)]

pub use archgate_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use archgate_rules::*;
}

mod runner;

pub use runner::{assert_preset, assert_rule, assert_rules, assert_rules_with_config};
