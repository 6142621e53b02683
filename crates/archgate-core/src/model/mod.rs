//! Read-only code model consumed by predicates and conditions.
//!
//! The engine never parses anything: a model is produced elsewhere and
//! exposed through the [`CodeModel`] trait. [`InMemoryModel`] is the
//! implementation shipped with this crate, assembled with [`ModelBuilder`].
//!
//! ```text
//! ClassDecl / MemberDecl
//!   ↓ ModelBuilder::build()
//! InMemoryModel (elements + dependency edges, indexed)
//!   ↓ &dyn CodeModel
//! Predicate / Condition
//! ```

use std::collections::{HashSet, VecDeque};

mod builder;
mod dependency;
mod element;
mod memory;

pub use builder::{AccessDecl, BuildError, ClassDecl, MemberDecl, ModelBuilder};
pub use dependency::{Dependency, DependencyKind};
pub use element::{Annotation, ClassFlavor, EdgeId, Element, ElementId, ElementKind, Visibility};
pub use memory::InMemoryModel;

/// Upper bound on annotation-of-annotation hops during meta-annotation lookup.
pub const MAX_META_ANNOTATION_DEPTH: usize = 16;

/// Read interface over an immutable model of classes, members and edges.
///
/// Implementations must be safe to share between threads: rules evaluated
/// concurrently only ever read through `&self`.
///
/// Only the first five methods are required; the others derive from them and
/// may be overridden with indexed lookups.
pub trait CodeModel: Send + Sync {
    /// Returns the element with the given identifier.
    fn element(&self, id: ElementId) -> Option<&Element>;

    /// Returns the class (declared or stub) with the given full name.
    fn class_named(&self, full_name: &str) -> Option<&Element>;

    /// Returns the declared classes in model order. Stub classes are excluded.
    fn classes(&self) -> Vec<&Element>;

    /// Returns the declared members (constructors, methods, fields) of a class
    /// in declaration order. Stub members are not included.
    fn members_of(&self, class: ElementId) -> Vec<&Element>;

    /// Returns every dependency edge in model order.
    fn dependencies(&self) -> &[Dependency];

    /// Returns the dependency edge with the given identifier.
    fn dependency(&self, id: EdgeId) -> Option<&Dependency> {
        self.dependencies().iter().find(|d| d.id() == id)
    }

    /// Returns the methods of all declared classes in model order.
    fn methods(&self) -> Vec<&Element> {
        self.classes()
            .into_iter()
            .flat_map(|class| self.members_of(class.id()))
            .filter(|member| member.kind() == ElementKind::Method && !member.is_stub())
            .collect()
    }

    /// Returns the declared classes directly annotated with `annotation`.
    fn classes_annotated_with(&self, annotation: &str) -> Vec<&Element> {
        self.classes()
            .into_iter()
            .filter(|class| class.is_annotated_with(annotation))
            .collect()
    }

    /// Returns the methods directly annotated with any of `annotations`.
    fn methods_annotated_with_any(&self, annotations: &[&str]) -> Vec<&Element> {
        self.methods()
            .into_iter()
            .filter(|method| annotations.iter().any(|a| method.is_annotated_with(a)))
            .collect()
    }

    /// Returns the edges leaving `class` towards other classes.
    fn direct_dependencies_from(&self, class: ElementId) -> Vec<&Dependency> {
        self.dependencies()
            .iter()
            .filter(|d| d.origin_class() == class && !d.is_self_edge())
            .collect()
    }

    /// Returns the edges entering `class` from other classes.
    fn direct_dependencies_into(&self, class: ElementId) -> Vec<&Dependency> {
        self.dependencies()
            .iter()
            .filter(|d| d.target_class() == class && !d.is_self_edge())
            .collect()
    }

    /// Returns the call edges originating in `class`, including calls to itself.
    fn call_edges_from_self(&self, class: ElementId) -> Vec<&Dependency> {
        self.dependencies()
            .iter()
            .filter(|d| d.kind().is_access() && d.origin_class() == class)
            .collect()
    }

    /// Returns the call edges targeting `class`, including calls from itself.
    fn call_edges_to_self(&self, class: ElementId) -> Vec<&Dependency> {
        self.dependencies()
            .iter()
            .filter(|d| d.kind().is_access() && d.target_class() == class)
            .collect()
    }

    /// Returns true if `element` carries `annotation` directly.
    fn is_annotated_with(&self, element: &Element, annotation: &str) -> bool {
        element.is_annotated_with(annotation)
    }

    /// Returns true if `element` carries `annotation` directly or through
    /// annotation types that are themselves (transitively) annotated with it.
    ///
    /// Walks breadth-first with a visited set and stops after
    /// [`MAX_META_ANNOTATION_DEPTH`] hops, so cyclic annotation graphs terminate.
    fn is_meta_annotated_with(&self, element: &Element, annotation: &str) -> bool {
        let mut queue: VecDeque<(&str, usize)> = element
            .annotations()
            .iter()
            .map(|a| (a.type_name(), 0))
            .collect();
        let mut visited: HashSet<&str> = HashSet::new();

        while let Some((name, depth)) = queue.pop_front() {
            if name == annotation {
                return true;
            }
            if depth >= MAX_META_ANNOTATION_DEPTH || !visited.insert(name) {
                continue;
            }
            if let Some(annotation_type) = self.class_named(name) {
                queue.extend(
                    annotation_type
                        .annotations()
                        .iter()
                        .map(|a| (a.type_name(), depth + 1)),
                );
            }
        }
        false
    }

    /// Returns the zero-argument constructor of `class`, declared or implicit.
    ///
    /// A stub constructor, known only from a call site, never counts.
    fn try_get_zero_arg_constructor(&self, class: ElementId) -> Option<&Element> {
        self.members_of(class).into_iter().find(|m| {
            m.kind() == ElementKind::Constructor && m.parameters().is_empty() && !m.is_stub()
        })
    }

    /// Resolves an element identifier, failing if the model does not know it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelInconsistency::UnknownElement`] for dangling identifiers.
    fn resolve(&self, id: ElementId) -> Result<&Element, ModelInconsistency> {
        self.element(id).ok_or(ModelInconsistency::UnknownElement(id))
    }

    /// Returns the class owning a member.
    ///
    /// # Errors
    ///
    /// Returns [`ModelInconsistency::MissingOwner`] if the member has no owner
    /// or the owner is not part of the model.
    fn owner_of(&self, member: &Element) -> Result<&Element, ModelInconsistency> {
        member
            .owner()
            .and_then(|owner| self.element(owner))
            .ok_or_else(|| ModelInconsistency::MissingOwner {
                member: member.full_name().to_string(),
            })
    }
}

/// Data returned by a [`CodeModel`] that a condition cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelInconsistency {
    /// An identifier does not resolve to an element.
    #[error("element #{} is not part of the code model", .0.index())]
    UnknownElement(ElementId),

    /// A member has no owning class.
    #[error("{member} has no owning class")]
    MissingOwner {
        /// Full name of the member.
        member: String,
    },

    /// A call edge originates from something other than a method or constructor.
    #[error(
        "call edge #{} originates from {origin}, which is not a method or constructor",
        .edge.index()
    )]
    NotACodeUnit {
        /// The offending edge.
        edge: EdgeId,
        /// Description of the origin element.
        origin: String,
    },
}
