//! Utility functions for predicate and condition implementations.

pub mod packages;

#[doc(inline)]
pub use packages::{is_primitive, package_matches, package_name, simple_name};
