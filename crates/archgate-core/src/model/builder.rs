//! Declarative builder for [`InMemoryModel`].
//!
//! Callers describe classes, members, annotations and accesses; the builder
//! resolves names, synthesizes implicit constructors and stub elements, and
//! derives every dependency edge.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use super::dependency::{Dependency, DependencyKind};
use super::element::{
    code_unit_full_name, Annotation, ClassFlavor, EdgeId, Element, ElementId, ElementKind,
    Visibility,
};
use super::memory::InMemoryModel;
use crate::utils::packages::{is_primitive, simple_name};

const CONSTRUCTOR_NAME: &str = "<init>";

/// Errors raised while assembling a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Two class declarations share a full name.
    #[error("class `{name}` is declared more than once")]
    DuplicateClass {
        /// Full name of the class.
        name: String,
    },

    /// Two members of one class share a signature.
    #[error("`{name}` is declared more than once")]
    DuplicateMember {
        /// Full name of the member.
        name: String,
    },

    /// A member was added to a class that is not declared.
    #[error("cannot declare `{member}` on unknown class `{owner}`")]
    UnknownOwner {
        /// Name of the owner that could not be found.
        owner: String,
        /// Simple name of the member.
        member: String,
    },

    /// A class or member name is empty.
    #[error("empty name in declaration of {what}")]
    EmptyName {
        /// What was being declared.
        what: &'static str,
    },
}

/// A reference from a code unit to another member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecl {
    kind: DependencyKind,
    owner: String,
    name: String,
    parameters: Vec<String>,
    line: Option<u32>,
}

impl AccessDecl {
    /// A call to `owner.name(parameters)`.
    #[must_use]
    pub fn method_call(
        owner: impl Into<String>,
        name: impl Into<String>,
        parameters: &[&str],
    ) -> Self {
        Self {
            kind: DependencyKind::MethodCall,
            owner: owner.into(),
            name: name.into(),
            parameters: parameters.iter().map(ToString::to_string).collect(),
            line: None,
        }
    }

    /// A call to the constructor `owner.<init>(parameters)`.
    #[must_use]
    pub fn constructor_call(owner: impl Into<String>, parameters: &[&str]) -> Self {
        Self {
            kind: DependencyKind::ConstructorCall,
            owner: owner.into(),
            name: CONSTRUCTOR_NAME.to_string(),
            parameters: parameters.iter().map(ToString::to_string).collect(),
            line: None,
        }
    }

    /// A read or write of the field `owner.name`.
    #[must_use]
    pub fn field_access(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: DependencyKind::FieldAccess,
            owner: owner.into(),
            name: name.into(),
            parameters: Vec::new(),
            line: None,
        }
    }

    /// Sets the source line of the access.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// Declaration of a constructor, method or field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    kind: ElementKind,
    name: String,
    visibility: Visibility,
    is_static: bool,
    annotations: Vec<Annotation>,
    parameters: Vec<String>,
    return_type: Option<String>,
    field_type: Option<String>,
    accesses: Vec<AccessDecl>,
}

impl MemberDecl {
    fn new(kind: ElementKind, name: String) -> Self {
        Self {
            kind,
            name,
            visibility: Visibility::Public,
            is_static: false,
            annotations: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            field_type: None,
            accesses: Vec::new(),
        }
    }

    /// A public `void` method without parameters.
    #[must_use]
    pub fn method(name: impl Into<String>) -> Self {
        let mut decl = Self::new(ElementKind::Method, name.into());
        decl.return_type = Some("void".to_string());
        decl
    }

    /// A public constructor without parameters.
    #[must_use]
    pub fn constructor() -> Self {
        Self::new(ElementKind::Constructor, CONSTRUCTOR_NAME.to_string())
    }

    /// A public field of the given type.
    #[must_use]
    pub fn field(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        let mut decl = Self::new(ElementKind::Field, name.into());
        decl.field_type = Some(field_type.into());
        decl
    }

    /// Appends a parameter type.
    #[must_use]
    pub fn parameter(mut self, type_name: impl Into<String>) -> Self {
        self.parameters.push(type_name.into());
        self
    }

    /// Sets the return type of a method.
    #[must_use]
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    /// Sets the access modifier.
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the member static.
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Adds an annotation without attributes.
    #[must_use]
    pub fn annotated_with(self, type_name: impl Into<String>) -> Self {
        self.annotation(Annotation::new(type_name))
    }

    /// Adds an annotation.
    #[must_use]
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Records a call to `owner.name(parameters)`.
    #[must_use]
    pub fn calls_method(
        self,
        owner: impl Into<String>,
        name: impl Into<String>,
        parameters: &[&str],
    ) -> Self {
        self.access(AccessDecl::method_call(owner, name, parameters))
    }

    /// Records a call to a constructor of `owner`.
    #[must_use]
    pub fn calls_constructor(self, owner: impl Into<String>, parameters: &[&str]) -> Self {
        self.access(AccessDecl::constructor_call(owner, parameters))
    }

    /// Records an access to the field `owner.name`.
    #[must_use]
    pub fn accesses_field(self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.access(AccessDecl::field_access(owner, name))
    }

    /// Records an access.
    #[must_use]
    pub fn access(mut self, access: AccessDecl) -> Self {
        self.accesses.push(access);
        self
    }
}

/// Declaration of a class, interface or annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    name: String,
    flavor: ClassFlavor,
    visibility: Visibility,
    annotations: Vec<Annotation>,
    source_file: Option<String>,
    extends: Option<String>,
    implements: Vec<String>,
    members: Vec<MemberDecl>,
}

impl ClassDecl {
    fn new(name: String, flavor: ClassFlavor) -> Self {
        Self {
            name,
            flavor,
            visibility: Visibility::Public,
            annotations: Vec::new(),
            source_file: None,
            extends: None,
            implements: Vec::new(),
            members: Vec::new(),
        }
    }

    /// A public class.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name.into(), ClassFlavor::Class)
    }

    /// A public interface.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name.into(), ClassFlavor::Interface)
    }

    /// A public annotation type.
    #[must_use]
    pub fn annotation_type(name: impl Into<String>) -> Self {
        Self::new(name.into(), ClassFlavor::Annotation)
    }

    /// Sets the access modifier.
    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Adds an annotation without attributes.
    #[must_use]
    pub fn annotated_with(self, type_name: impl Into<String>) -> Self {
        self.annotation(Annotation::new(type_name))
    }

    /// Adds an annotation.
    #[must_use]
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Sets the source file name used in edge descriptions.
    #[must_use]
    pub fn source_file(mut self, file: impl Into<String>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    /// Sets the superclass.
    #[must_use]
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.extends = Some(superclass.into());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Adds a member of any kind.
    #[must_use]
    pub fn member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    /// Adds a constructor.
    #[must_use]
    pub fn constructor(self, constructor: MemberDecl) -> Self {
        self.member(constructor)
    }

    /// Adds a method.
    #[must_use]
    pub fn method(self, method: MemberDecl) -> Self {
        self.member(method)
    }

    /// Adds a field.
    #[must_use]
    pub fn field(self, field: MemberDecl) -> Self {
        self.member(field)
    }

    fn declares_constructor(&self) -> bool {
        self.members
            .iter()
            .any(|m| m.kind == ElementKind::Constructor)
    }
}

/// Assembles an [`InMemoryModel`] from declarations.
///
/// # Example
///
/// ```
/// use archgate_core::{ClassDecl, CodeModel, MemberDecl, ModelBuilder};
///
/// let model = ModelBuilder::new()
///     .class(ClassDecl::class("shop.Order").field(MemberDecl::field("id", "long")))
///     .build()?;
///
/// let order = model.class_named("shop.Order").unwrap();
/// assert!(model.try_get_zero_arg_constructor(order.id()).is_some());
/// # Ok::<(), archgate_core::BuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    classes: Vec<ClassDecl>,
    extra_members: Vec<(String, MemberDecl)>,
}

impl ModelBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a class.
    #[must_use]
    pub fn class(mut self, class: ClassDecl) -> Self {
        self.classes.push(class);
        self
    }

    /// Declares several classes.
    #[must_use]
    pub fn classes(mut self, classes: impl IntoIterator<Item = ClassDecl>) -> Self {
        self.classes.extend(classes);
        self
    }

    /// Declares a member on a class declared elsewhere in this builder.
    #[must_use]
    pub fn member(mut self, owner: impl Into<String>, member: MemberDecl) -> Self {
        self.extra_members.push((owner.into(), member));
        self
    }

    /// Builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] for duplicate classes or members, members on
    /// undeclared classes and empty names.
    pub fn build(self) -> Result<InMemoryModel, BuildError> {
        let Self {
            mut classes,
            extra_members,
        } = self;

        for (owner, member) in extra_members {
            let Some(class) = classes.iter_mut().find(|c| c.name == owner) else {
                return Err(BuildError::UnknownOwner {
                    owner,
                    member: member.name,
                });
            };
            class.members.push(member);
        }

        let mut resolver = Resolver::default();
        let class_ids = resolver.declare_classes(&classes)?;
        let member_ids = classes
            .iter()
            .zip(&class_ids)
            .map(|(decl, &class_id)| resolver.declare_members(decl, class_id))
            .collect::<Result<Vec<_>, _>>()?;

        for ((decl, &class_id), members) in classes.iter().zip(&class_ids).zip(&member_ids) {
            resolver.link_class(decl, class_id);
            for (member, &member_id) in decl.members.iter().zip(members) {
                resolver.link_member(member, member_id, class_id);
            }
        }

        debug!(
            "Built code model: {} classes, {} elements, {} dependencies",
            classes.len(),
            resolver.model.element_count(),
            resolver.model.dependency_count()
        );
        Ok(resolver.model)
    }
}

/// Mutable state of one build.
#[derive(Default)]
struct Resolver {
    model: InMemoryModel,
}

impl Resolver {
    fn declare_classes(&mut self, classes: &[ClassDecl]) -> Result<Vec<ElementId>, BuildError> {
        let mut ids = Vec::with_capacity(classes.len());
        for decl in classes {
            if decl.name.is_empty() {
                return Err(BuildError::EmptyName { what: "a class" });
            }
            if self.model.class_id(&decl.name).is_some() {
                return Err(BuildError::DuplicateClass {
                    name: decl.name.clone(),
                });
            }
            let id = self.model.next_element_id();
            self.model.push_class(Element {
                id,
                kind: ElementKind::Class,
                name: simple_name(&decl.name).to_string(),
                full_name: decl.name.clone(),
                owner: None,
                flavor: decl.flavor,
                visibility: decl.visibility,
                is_static: false,
                annotations: decl.annotations.clone(),
                parameters: Vec::new(),
                return_type: None,
                field_type: None,
                source_file: decl.source_file.clone(),
                is_stub: false,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    fn declare_members(
        &mut self,
        decl: &ClassDecl,
        class_id: ElementId,
    ) -> Result<Vec<ElementId>, BuildError> {
        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(decl.members.len());
        for member in &decl.members {
            if member.name.is_empty() {
                return Err(BuildError::EmptyName { what: "a member" });
            }
            let id = self.model.next_element_id();
            let element = member_element(id, class_id, &decl.name, member, false);
            if !seen.insert((element.kind == ElementKind::Field, element.full_name.clone())) {
                return Err(BuildError::DuplicateMember {
                    name: element.full_name,
                });
            }
            ids.push(self.model.push_member(element));
        }

        if decl.flavor == ClassFlavor::Class && !decl.declares_constructor() {
            let implicit = MemberDecl::constructor().visibility(decl.visibility);
            let id = self.model.next_element_id();
            let element = member_element(id, class_id, &decl.name, &implicit, false);
            self.model.push_member(element);
        }
        Ok(ids)
    }

    fn link_class(&mut self, decl: &ClassDecl, class_id: ElementId) {
        for annotation in &decl.annotations {
            self.type_edge(DependencyKind::Annotation, class_id, class_id, annotation.type_name());
        }
        if let Some(superclass) = &decl.extends {
            self.type_edge(DependencyKind::Extends, class_id, class_id, superclass);
        }
        for interface in &decl.implements {
            self.type_edge(DependencyKind::Implements, class_id, class_id, interface);
        }
    }

    fn link_member(&mut self, decl: &MemberDecl, member_id: ElementId, class_id: ElementId) {
        for annotation in &decl.annotations {
            self.type_edge(DependencyKind::Annotation, member_id, class_id, annotation.type_name());
        }
        if let Some(field_type) = &decl.field_type {
            self.type_edge(DependencyKind::FieldType, member_id, class_id, field_type);
        }
        for parameter in &decl.parameters {
            self.type_edge(DependencyKind::ParameterType, member_id, class_id, parameter);
        }
        if decl.kind == ElementKind::Method {
            if let Some(return_type) = &decl.return_type {
                self.type_edge(DependencyKind::ReturnType, member_id, class_id, return_type);
            }
        }
        if decl.kind.is_code_unit() {
            for access in &decl.accesses {
                self.access_edge(access, member_id, class_id);
            }
        }
    }

    /// Adds an edge towards a type, skipping primitives and `void`.
    fn type_edge(
        &mut self,
        kind: DependencyKind,
        origin: ElementId,
        origin_class: ElementId,
        type_name: &str,
    ) {
        let type_name = type_name.trim_end_matches("[]");
        if is_primitive(type_name) {
            return;
        }
        let target = self.ensure_class(type_name);
        self.edge(kind, origin, origin_class, target, target, None);
    }

    fn access_edge(&mut self, access: &AccessDecl, origin: ElementId, origin_class: ElementId) {
        let target_class = self.ensure_class(&access.owner);
        let target = self.ensure_member(target_class, &access.owner, access);
        self.edge(access.kind, origin, origin_class, target, target_class, access.line);
    }

    fn edge(
        &mut self,
        kind: DependencyKind,
        origin: ElementId,
        origin_class: ElementId,
        target: ElementId,
        target_class: ElementId,
        line: Option<u32>,
    ) {
        self.model.push_dependency(Dependency {
            id: EdgeId(0),
            kind,
            origin,
            origin_class,
            target,
            target_class,
            line,
        });
    }

    /// Returns the class with the given name, creating a stub if needed.
    fn ensure_class(&mut self, name: &str) -> ElementId {
        if let Some(id) = self.model.class_id(name) {
            return id;
        }
        let id = self.model.next_element_id();
        self.model.push_class(Element {
            id,
            kind: ElementKind::Class,
            name: simple_name(name).to_string(),
            full_name: name.to_string(),
            owner: None,
            flavor: ClassFlavor::Class,
            visibility: Visibility::Unknown,
            is_static: false,
            annotations: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            field_type: None,
            source_file: None,
            is_stub: true,
        })
    }

    /// Returns the accessed member, creating a stub on the target class if needed.
    ///
    /// Stubs carry [`Visibility::Unknown`] and no return type, and stay out of
    /// the target class's declared members, even when that class is declared.
    fn ensure_member(&mut self, class: ElementId, owner: &str, access: &AccessDecl) -> ElementId {
        let kind = match access.kind {
            DependencyKind::ConstructorCall => ElementKind::Constructor,
            DependencyKind::FieldAccess => ElementKind::Field,
            _ => ElementKind::Method,
        };
        let parameters: Vec<&str> = access.parameters.iter().map(String::as_str).collect();
        if let Some(existing) = self.model.member(class, kind, &access.name, &parameters) {
            return existing.id;
        }

        let mut decl =
            MemberDecl::new(kind, access.name.clone()).visibility(Visibility::Unknown);
        decl.parameters.clone_from(&access.parameters);
        let element = member_element(self.model.next_element_id(), class, owner, &decl, true);
        self.model.push_member(element)
    }
}

fn member_element(
    id: ElementId,
    owner: ElementId,
    owner_name: &str,
    decl: &MemberDecl,
    is_stub: bool,
) -> Element {
    let full_name = if decl.kind == ElementKind::Field {
        format!("{owner_name}.{}", decl.name)
    } else {
        code_unit_full_name(owner_name, &decl.name, &decl.parameters)
    };
    Element {
        id,
        kind: decl.kind,
        name: decl.name.clone(),
        full_name,
        owner: Some(owner),
        flavor: ClassFlavor::Class,
        visibility: decl.visibility,
        is_static: decl.is_static,
        annotations: decl.annotations.clone(),
        parameters: decl.parameters.clone(),
        return_type: decl.return_type.clone(),
        field_type: decl.field_type.clone(),
        source_file: None,
        is_stub,
    }
}
