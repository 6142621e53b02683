//! Element-kind markers that type predicates, conditions and selections.
//!
//! A `Predicate<Classes>` can only refine a class selection, and a
//! `Condition<Methods>` can only be attached to a method selection. Mixing
//! kinds is a compile error.

use crate::model::{CodeModel, Element};

/// An element kind that rules can select.
pub trait Kind: Send + Sync + 'static {
    /// Plural noun used in rule descriptions and empty-selection errors.
    const NOUN: &'static str;

    /// Returns the candidate elements of this kind, in model order.
    fn select(model: &dyn CodeModel) -> Vec<&Element>;
}

/// Marker for rules over declared classes.
#[derive(Debug)]
pub enum Classes {}

/// Marker for rules over methods of declared classes.
#[derive(Debug)]
pub enum Methods {}

impl Kind for Classes {
    const NOUN: &'static str = "classes";

    fn select(model: &dyn CodeModel) -> Vec<&Element> {
        model.classes()
    }
}

impl Kind for Methods {
    const NOUN: &'static str = "methods";

    fn select(model: &dyn CodeModel) -> Vec<&Element> {
        model.methods()
    }
}
