//! Class node: members, the direction × type relation matrix and the checkable ledger.
//!
//! Nodes live in a [`crate::domain::graph::ClassModel`] arena and refer to each other through
//! [`ClassId`] handles. Every mutation touching two endpoints goes through the model; this
//! module only keeps one side consistent.

use std::collections::{BTreeMap, HashSet};

use crate::domain::edge::{RelationDirection, RelationType};
use crate::domain::element::{
    Annotation, ElementKind, ElementModifier, LangElement, ParameterizableElement, TypeDescriptor,
    strip_qualifiers, type_parameters_declaration,
};

/// Handle of a class inside its model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Construction state of a class node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Members and relations are still being added.
    Building,
    /// Members sorted; outbound super types and nestings frozen.
    MembersFinalized,
    /// All outbound relations and the outer class frozen.
    RelationsFinalized,
}

/// A relation collection: unique and insertion-ordered while open, a fixed sequence once frozen.
#[derive(Debug, Clone)]
pub(crate) enum RelationSet {
    Open {
        order: Vec<ClassId>,
        seen: HashSet<ClassId>,
    },
    Frozen(Box<[ClassId]>),
}

impl Default for RelationSet {
    fn default() -> Self {
        RelationSet::Open {
            order: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl RelationSet {
    pub(crate) fn as_slice(&self) -> &[ClassId] {
        match self {
            RelationSet::Open { order, .. } => order,
            RelationSet::Frozen(ids) => ids,
        }
    }

    pub(crate) fn is_frozen(&self) -> bool {
        matches!(self, RelationSet::Frozen(_))
    }

    /// Returns false when `id` was already present.
    fn insert(&mut self, id: ClassId) -> bool {
        match self {
            RelationSet::Open { order, seen } => {
                let inserted = seen.insert(id);
                if inserted {
                    order.push(id);
                }
                inserted
            }
            RelationSet::Frozen(_) => unreachable!("insert into frozen relation set"),
        }
    }
}

/// Class, interface, enum, annotation type or throwable.
///
/// `core.id` is the fully qualified type name and `core.name` the short one.
#[derive(Debug, Clone)]
pub struct ClassNode {
    handle: ClassId,
    pub element: ParameterizableElement,
    pub type_parameters: Vec<TypeDescriptor>,
    members: BTreeMap<ElementKind, Vec<ParameterizableElement>>,
    relations: [[RelationSet; RelationType::COUNT]; 2],
    ledger: [HashSet<ClassId>; 2],
    lifecycle: Lifecycle,
}

impl ClassNode {
    pub(crate) fn new(
        handle: ClassId,
        element: ParameterizableElement,
        type_parameters: Vec<TypeDescriptor>,
    ) -> Self {
        Self {
            handle,
            element,
            type_parameters,
            members: BTreeMap::new(),
            relations: std::array::from_fn(|_| std::array::from_fn(|_| RelationSet::default())),
            ledger: std::array::from_fn(|_| HashSet::new()),
            lifecycle: Lifecycle::Building,
        }
    }

    pub fn handle(&self) -> ClassId {
        self.handle
    }

    pub fn core(&self) -> &LangElement {
        &self.element.core
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.element.annotations
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// True once the relations of this class were established across the whole graph.
    /// Classes only referenced by others stay false and render as placeholders.
    pub fn relations_processed(&self) -> bool {
        self.lifecycle == Lifecycle::RelationsFinalized
    }

    pub fn is_interface(&self) -> bool {
        self.core().has_modifier(ElementModifier::Interface)
    }

    /// Members of one kind. Before members are finished this is the unsorted construction
    /// order; afterwards every member-bearing kind is present, possibly empty.
    pub fn members(&self, kind: ElementKind) -> &[ParameterizableElement] {
        self.members.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Present member kinds in kind order, including empty ones filled at finalisation.
    pub fn member_kinds(&self) -> impl Iterator<Item = (ElementKind, &[ParameterizableElement])> {
        self.members.iter().map(|(kind, list)| (*kind, list.as_slice()))
    }

    pub fn has_member_kind(&self, kind: ElementKind) -> bool {
        self.members.contains_key(&kind)
    }

    pub fn relations(&self, relation: RelationType, direction: RelationDirection) -> &[ClassId] {
        self.relations[direction.index()][relation.index()].as_slice()
    }

    pub fn is_relation_frozen(&self, relation: RelationType, direction: RelationDirection) -> bool {
        self.relations[direction.index()][relation.index()].is_frozen()
    }

    /// Number of distinct classes related through any checkable relation.
    pub fn checked_targets(&self, direction: RelationDirection) -> usize {
        self.ledger[direction.index()].len()
    }

    pub fn is_checked_target(&self, direction: RelationDirection, target: ClassId) -> bool {
        self.ledger[direction.index()].contains(&target)
    }

    /// Short name followed by type parameters, qualifiers stripped.
    pub fn short_name_with_params(&self) -> String {
        strip_qualifiers(&self.with_params(&self.core().name))
    }

    pub fn full_name_with_params(&self) -> String {
        self.with_params(&self.core().id)
    }

    /// Qualified name in UML notation (`a::b::C`).
    pub fn full_name_uml(&self) -> String {
        self.core().id.replace('.', "::")
    }

    /// UML namespace including the trailing separator, if the class has one.
    pub fn namespace_uml(&self) -> Option<String> {
        let full = self.full_name_uml();
        full.rfind("::").map(|idx| full[..idx + 2].to_string())
    }

    fn with_params(&self, prefix: &str) -> String {
        format!("{}{}", prefix, type_parameters_declaration(&self.type_parameters))
    }

    pub(crate) fn push_member(&mut self, member: ParameterizableElement) {
        assert!(
            self.lifecycle == Lifecycle::Building,
            "member `{}` added to `{}` after its members were finished",
            member.core.name,
            self.core().id
        );
        self.members.entry(member.kind()).or_default().push(member);
    }

    /// Records one side of a relation. Returns false when the edge was dropped, either by the
    /// checkable ledger or because it was already present.
    pub(crate) fn record(
        &mut self,
        direction: RelationDirection,
        relation: RelationType,
        target: ClassId,
    ) -> bool {
        if relation.is_checkable() && !self.ledger[direction.index()].insert(target) {
            return false;
        }
        let cell = &mut self.relations[direction.index()][relation.index()];
        assert!(
            !cell.is_frozen(),
            "{} {:?} relations of `{}` are already finalized",
            relation,
            direction,
            self.element.core.id
        );
        cell.insert(target)
    }

    /// Sorts present member lists and fills absent member-bearing kinds.
    pub(crate) fn finalize_members(
        &mut self,
        compare: impl Fn(&ParameterizableElement, &ParameterizableElement) -> std::cmp::Ordering,
    ) {
        for list in self.members.values_mut() {
            list.sort_by(&compare);
        }
        for kind in ElementKind::MEMBER_KINDS {
            self.members.entry(kind).or_default();
        }
    }

    pub(crate) fn freeze(
        &mut self,
        direction: RelationDirection,
        relation: RelationType,
        ordered: Vec<ClassId>,
    ) {
        self.relations[direction.index()][relation.index()] =
            RelationSet::Frozen(ordered.into_boxed_slice());
    }

    pub(crate) fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::element::ElementVisibility;

    fn node(id: &str, name: &str) -> ClassNode {
        ClassNode::new(
            ClassId(0),
            ParameterizableElement::new(LangElement::new(
                id,
                name,
                ElementKind::Class,
                ElementVisibility::Public,
            )),
            vec![],
        )
    }

    #[test]
    fn test_every_cell_exists_and_is_empty() {
        let class = node("a.B", "B");
        for direction in RelationDirection::ALL {
            for relation in RelationType::ALL {
                assert!(class.relations(relation, direction).is_empty());
                assert!(!class.is_relation_frozen(relation, direction));
            }
        }
        assert_eq!(class.lifecycle(), Lifecycle::Building);
        assert!(!class.relations_processed());
    }

    #[test]
    fn test_record_is_unique_and_keeps_insertion_order() {
        let mut class = node("a.B", "B");
        assert!(class.record(RelationDirection::Outbound, RelationType::DependencyThrows, ClassId(3)));
        assert!(class.record(RelationDirection::Outbound, RelationType::DependencyThrows, ClassId(1)));
        assert!(!class.record(RelationDirection::Outbound, RelationType::DependencyThrows, ClassId(3)));
        assert_eq!(
            class.relations(RelationType::DependencyThrows, RelationDirection::Outbound),
            &[ClassId(3), ClassId(1)]
        );
    }

    #[test]
    fn test_ledger_is_per_direction() {
        let mut class = node("a.B", "B");
        assert!(class.record(RelationDirection::Outbound, RelationType::Association, ClassId(1)));
        assert!(class.record(RelationDirection::Inbound, RelationType::Dependency, ClassId(1)));
        assert!(!class.record(RelationDirection::Outbound, RelationType::InnerClass, ClassId(1)));
        assert_eq!(class.checked_targets(RelationDirection::Outbound), 1);
        assert_eq!(class.checked_targets(RelationDirection::Inbound), 1);
        assert!(class.is_checked_target(RelationDirection::Outbound, ClassId(1)));
    }

    #[test]
    #[should_panic(expected = "already finalized")]
    fn test_record_into_frozen_cell_panics() {
        let mut class = node("a.B", "B");
        class.freeze(RelationDirection::Outbound, RelationType::SuperClass, vec![]);
        class.record(RelationDirection::Outbound, RelationType::SuperClass, ClassId(2));
    }

    #[test]
    fn test_uml_names() {
        let mut class = node("com.acme.Map$Entry", "Map$Entry");
        class.type_parameters = vec![TypeDescriptor::new("K"), TypeDescriptor::new("V")];
        assert_eq!(class.short_name_with_params(), "Entry<K, V>");
        assert_eq!(class.full_name_with_params(), "com.acme.Map$Entry<K, V>");
        assert_eq!(class.full_name_uml(), "com::acme::Map$Entry");
        assert_eq!(class.namespace_uml().as_deref(), Some("com::acme::"));
        assert_eq!(node("Top", "Top").namespace_uml(), None);
    }
}
