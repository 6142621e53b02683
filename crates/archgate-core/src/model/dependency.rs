//! Dependency and call edges between elements.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::element::{EdgeId, Element, ElementId};

/// Kind of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// A field declares the target type.
    FieldType,
    /// A method or constructor takes the target type as parameter.
    ParameterType,
    /// A method returns the target type.
    ReturnType,
    /// A code unit calls the target method.
    MethodCall,
    /// A code unit calls the target constructor.
    ConstructorCall,
    /// A code unit reads or writes the target field.
    FieldAccess,
    /// An element is annotated with the target annotation type.
    Annotation,
    /// A class extends the target class.
    Extends,
    /// A class implements the target interface.
    Implements,
}

impl DependencyKind {
    /// Returns true for call edges (method calls, constructor calls, field accesses).
    #[must_use]
    pub fn is_access(self) -> bool {
        matches!(
            self,
            Self::MethodCall | Self::ConstructorCall | Self::FieldAccess
        )
    }
}

/// A directed edge: `origin` (owned by `origin_class`) depends on `target`
/// (owned by `target_class`).
///
/// For class-level edges the origin and its owner class are the same element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub(crate) id: EdgeId,
    pub(crate) kind: DependencyKind,
    pub(crate) origin: ElementId,
    pub(crate) origin_class: ElementId,
    pub(crate) target: ElementId,
    pub(crate) target_class: ElementId,
    pub(crate) line: Option<u32>,
}

impl Dependency {
    /// Returns the edge identifier.
    #[must_use]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns the edge kind.
    #[must_use]
    pub fn kind(&self) -> DependencyKind {
        self.kind
    }

    /// Returns the origin element (a class or a member).
    #[must_use]
    pub fn origin(&self) -> ElementId {
        self.origin
    }

    /// Returns the class owning the origin.
    #[must_use]
    pub fn origin_class(&self) -> ElementId {
        self.origin_class
    }

    /// Returns the target element (a class or a member).
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Returns the class owning the target.
    #[must_use]
    pub fn target_class(&self) -> ElementId {
        self.target_class
    }

    /// Returns the source line of the edge, if known.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Returns true if origin and target belong to the same class.
    #[must_use]
    pub fn is_self_edge(&self) -> bool {
        self.origin_class == self.target_class
    }

    /// Renders a human readable description of the edge.
    ///
    /// `origin_class` supplies the source file used for the location suffix.
    #[must_use]
    pub fn describe(&self, origin: &Element, origin_class: &Element, target: &Element) -> String {
        let mut text = match self.kind {
            DependencyKind::FieldType => {
                format!("{origin} has type <{}>", target.full_name())
            }
            DependencyKind::ParameterType => {
                format!("{origin} has parameter of type <{}>", target.full_name())
            }
            DependencyKind::ReturnType => {
                format!("{origin} has return type <{}>", target.full_name())
            }
            DependencyKind::MethodCall => {
                format!("{origin} calls method <{}>", target.full_name())
            }
            DependencyKind::ConstructorCall => {
                format!("{origin} calls constructor <{}>", target.full_name())
            }
            DependencyKind::FieldAccess => {
                format!("{origin} accesses field <{}>", target.full_name())
            }
            DependencyKind::Annotation => {
                format!("{origin} is annotated with <{}>", target.full_name())
            }
            DependencyKind::Extends => {
                format!("{origin} extends class <{}>", target.full_name())
            }
            DependencyKind::Implements => {
                format!("{origin} implements interface <{}>", target.full_name())
            }
        };
        if let (Some(file), Some(line)) = (origin_class.source_file(), self.line) {
            let _ = write!(text, " in ({file}:{line})");
        }
        text
    }
}

