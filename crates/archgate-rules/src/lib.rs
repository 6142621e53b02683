//! # archgate-rules
//!
//! Built-in architecture conformance rules for archgate.
//!
//! Rules and reusable conditions are process-wide immutable values, created on
//! first use and shared by every caller.
//!
//! ## Available Rules
//!
//! | Name | Module | Description |
//! |------|--------|-------------|
//! | `no-classes-should-use-junit-4` | [`standard`] | Forbids dependencies on JUnit 4 |
//! | `no-classes-should-use-java-util-date` | [`standard`] | Forbids `java.util.Date` |
//! | `jpa-entities-have-public-empty-constructor` | [`jpa`] | `@Entity` classes need a public no-arg constructor |
//! | `jpa-life-cycle-annotations-correctly-declared` | [`jpa`] | Lifecycle callbacks are `void` and parameterless |
//! | `spring-repositories-accessed-only-by-transactional-methods-or-classes` | [`spring`] | Repository calls happen under `@Transactional` |
//! | `spring-repositories-accessed-only-by-service-classes` | [`spring`] | Only `@Service` classes use repositories |
//! | `spring-repositories-accessed-only-by-service-or-controller-classes` | [`spring`] | Only `@Service`/`@Controller` classes use repositories |
//!
//! ## Usage
//!
//! ```
//! use archgate_core::{ClassDecl, ModelBuilder};
//! use archgate_rules::jpa::JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR;
//! use archgate_rules::markers::ENTITY;
//!
//! let model = ModelBuilder::new()
//!     .class(ClassDecl::class("shop.Order").annotated_with(ENTITY))
//!     .build()?;
//!
//! JPA_ENTITIES_HAVE_PUBLIC_EMPTY_CONSTRUCTOR.check(&model)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod jpa;
pub mod markers;
pub mod spring;
pub mod standard;

mod presets;

pub use presets::{all_rules, jpa_rules, spring_rules, standard_rules, Preset};

/// Re-export core types for convenience.
pub use archgate_core::{Condition, Rule, Verdict};
