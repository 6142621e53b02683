//! Program elements: classes, methods, constructors and fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::packages::{package_name, simple_name};

/// Identifier of an element inside one code model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Returns the raw index of this element.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifier of a dependency edge inside one code model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Returns the raw index of this edge.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of a program element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A class, interface or annotation type.
    Class,
    /// A method.
    Method,
    /// A constructor.
    Constructor,
    /// A field.
    Field,
}

impl ElementKind {
    /// Returns true for methods and constructors.
    #[must_use]
    pub fn is_code_unit(self) -> bool {
        matches!(self, Self::Method | Self::Constructor)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "Class"),
            Self::Method => write!(f, "Method"),
            Self::Constructor => write!(f, "Constructor"),
            Self::Field => write!(f, "Field"),
        }
    }
}

/// Flavour of a class element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassFlavor {
    /// A regular class.
    #[default]
    Class,
    /// An interface.
    Interface,
    /// An annotation type.
    Annotation,
}

/// Access modifier of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Never observed: the element is a stub known only from references.
    Unknown,
    /// Visible only inside the declaring class.
    Private,
    /// Visible inside the declaring package.
    Package,
    /// Visible to subclasses and the declaring package.
    Protected,
    /// Visible everywhere.
    #[default]
    Public,
}

/// An annotation attached to an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    type_name: String,
    attributes: BTreeMap<String, String>,
}

impl Annotation {
    /// Creates an annotation without attributes.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute value.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the fully qualified annotation type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the simple annotation type name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.type_name)
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns all attributes in key order.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

/// A class or member in the code model.
///
/// Elements are created by a model builder and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) kind: ElementKind,
    pub(crate) name: String,
    pub(crate) full_name: String,
    pub(crate) owner: Option<ElementId>,
    pub(crate) flavor: ClassFlavor,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) parameters: Vec<String>,
    pub(crate) return_type: Option<String>,
    pub(crate) field_type: Option<String>,
    pub(crate) source_file: Option<String>,
    pub(crate) is_stub: bool,
}

impl Element {
    /// Returns the element identifier.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the element kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Returns the simple name (`<init>` for constructors).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full name, e.g. `a.Foo`, `a.Foo.bar(int)` or `a.Foo.FIELD`.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the package of a class, or of the owning class for members.
    #[must_use]
    pub fn package(&self) -> &str {
        match self.kind {
            ElementKind::Class => package_name(&self.full_name),
            _ => package_name(self.owner_name()),
        }
    }

    /// Returns the owning class of a member.
    #[must_use]
    pub fn owner(&self) -> Option<ElementId> {
        self.owner
    }

    /// Returns the class flavour (only meaningful for classes).
    #[must_use]
    pub fn flavor(&self) -> ClassFlavor {
        self.flavor
    }

    /// Returns the access modifier.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns true if the element is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Returns true if the member is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns the directly declared annotations.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns the directly declared annotation with the given type name.
    #[must_use]
    pub fn annotation(&self, type_name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.type_name == type_name)
    }

    /// Returns true if directly annotated with the given annotation type.
    #[must_use]
    pub fn is_annotated_with(&self, type_name: &str) -> bool {
        self.annotation(type_name).is_some()
    }

    /// Returns the parameter type names of a method or constructor.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the return type name of a method (`void` when nothing is returned).
    #[must_use]
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// Returns the declared type name of a field.
    #[must_use]
    pub fn field_type(&self) -> Option<&str> {
        self.field_type.as_deref()
    }

    /// Returns the source file name of a class.
    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    /// Returns true if the element is only referenced, not declared, in the model.
    #[must_use]
    pub fn is_stub(&self) -> bool {
        self.is_stub
    }

    fn owner_name(&self) -> &str {
        // Member full names start with the owner's full name.
        match self.kind {
            ElementKind::Class => &self.full_name,
            ElementKind::Field => self
                .full_name
                .rsplit_once('.')
                .map_or("", |(owner, _)| owner),
            ElementKind::Method | ElementKind::Constructor => {
                let head = self.full_name.split('(').next().unwrap_or(&self.full_name);
                head.rsplit_once('.').map_or("", |(owner, _)| owner)
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.kind, self.full_name)
    }
}

/// Formats the full name of a code unit.
pub(crate) fn code_unit_full_name(owner: &str, name: &str, parameters: &[String]) -> String {
    format!("{owner}.{name}({})", parameters.join(", "))
}
