//! Indexed in-memory implementation of [`CodeModel`].

use std::collections::HashMap;

use super::dependency::Dependency;
use super::element::{EdgeId, Element, ElementId, ElementKind};
use super::CodeModel;

/// An immutable code model held entirely in memory.
///
/// Built with [`ModelBuilder`](super::ModelBuilder). Outgoing and incoming
/// edges are indexed per class, so graph queries do not scan every edge.
///
/// Stub members, created for accesses to members no declaration provides,
/// are kept apart from the declared ones: they resolve as edge targets but
/// are never returned by [`CodeModel::members_of`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryModel {
    elements: Vec<Element>,
    classes: Vec<ElementId>,
    by_name: HashMap<String, ElementId>,
    members: HashMap<ElementId, Vec<ElementId>>,
    stub_members: HashMap<ElementId, Vec<ElementId>>,
    dependencies: Vec<Dependency>,
    outgoing: HashMap<ElementId, Vec<EdgeId>>,
    incoming: HashMap<ElementId, Vec<EdgeId>>,
}

impl InMemoryModel {
    /// Returns the number of elements, stubs included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the number of dependency edges.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns the member of `class` with the given kind, name and parameters.
    ///
    /// Declared members are searched first, then stubs.
    #[must_use]
    pub fn member(
        &self,
        class: ElementId,
        kind: ElementKind,
        name: &str,
        parameters: &[&str],
    ) -> Option<&Element> {
        [&self.members, &self.stub_members]
            .into_iter()
            .filter_map(|index| index.get(&class))
            .flatten()
            .map(|id| &self.elements[id.0])
            .find(|member| {
                let same_signature = kind == ElementKind::Field
                    || member.parameters.iter().map(String::as_str).eq(parameters.iter().copied());
                member.kind == kind && member.name == name && same_signature
            })
    }

    /// Returns the stub members created on `class` for unresolved accesses.
    #[must_use]
    pub fn stub_members_of(&self, class: ElementId) -> Vec<&Element> {
        self.stub_members
            .get(&class)
            .map(|ids| ids.iter().map(|id| &self.elements[id.0]).collect())
            .unwrap_or_default()
    }

    /// Returns the element with the given full name (class or member).
    #[must_use]
    pub fn find(&self, full_name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.full_name == full_name)
    }

    pub(super) fn next_element_id(&self) -> ElementId {
        ElementId(self.elements.len())
    }

    pub(super) fn push_class(&mut self, element: Element) -> ElementId {
        let id = element.id;
        if !element.is_stub {
            self.classes.push(id);
        }
        self.by_name.insert(element.full_name.clone(), id);
        self.elements.push(element);
        id
    }

    pub(super) fn push_member(&mut self, element: Element) -> ElementId {
        let id = element.id;
        if let Some(owner) = element.owner {
            let index = if element.is_stub {
                &mut self.stub_members
            } else {
                &mut self.members
            };
            index.entry(owner).or_default().push(id);
        }
        self.elements.push(element);
        id
    }

    pub(super) fn push_dependency(&mut self, mut dependency: Dependency) -> EdgeId {
        let id = EdgeId(self.dependencies.len());
        dependency.id = id;
        self.outgoing
            .entry(dependency.origin_class)
            .or_default()
            .push(id);
        self.incoming
            .entry(dependency.target_class)
            .or_default()
            .push(id);
        self.dependencies.push(dependency);
        id
    }

    pub(super) fn class_id(&self, full_name: &str) -> Option<ElementId> {
        self.by_name.get(full_name).copied()
    }

    fn edges<'a>(
        &'a self,
        index: &'a HashMap<ElementId, Vec<EdgeId>>,
        class: ElementId,
    ) -> impl Iterator<Item = &'a Dependency> + 'a {
        index
            .get(&class)
            .into_iter()
            .flatten()
            .map(|id| &self.dependencies[id.0])
    }
}

impl CodeModel for InMemoryModel {
    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    fn class_named(&self, full_name: &str) -> Option<&Element> {
        self.class_id(full_name).and_then(|id| self.element(id))
    }

    fn classes(&self) -> Vec<&Element> {
        self.classes.iter().map(|id| &self.elements[id.0]).collect()
    }

    fn members_of(&self, class: ElementId) -> Vec<&Element> {
        self.members
            .get(&class)
            .map(|ids| ids.iter().map(|id| &self.elements[id.0]).collect())
            .unwrap_or_default()
    }

    fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    fn dependency(&self, id: EdgeId) -> Option<&Dependency> {
        self.dependencies.get(id.0)
    }

    fn direct_dependencies_from(&self, class: ElementId) -> Vec<&Dependency> {
        self.edges(&self.outgoing, class)
            .filter(|d| !d.is_self_edge())
            .collect()
    }

    fn direct_dependencies_into(&self, class: ElementId) -> Vec<&Dependency> {
        self.edges(&self.incoming, class)
            .filter(|d| !d.is_self_edge())
            .collect()
    }

    fn call_edges_from_self(&self, class: ElementId) -> Vec<&Dependency> {
        self.edges(&self.outgoing, class)
            .filter(|d| d.kind.is_access())
            .collect()
    }

    fn call_edges_to_self(&self, class: ElementId) -> Vec<&Dependency> {
        self.edges(&self.incoming, class)
            .filter(|d| d.kind.is_access())
            .collect()
    }
}
