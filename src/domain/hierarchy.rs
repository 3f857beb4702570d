//! Class hierarchy tree: classes nested under their super classes and realized interfaces.

use crate::domain::class::{ClassId, ClassNode};
use crate::domain::edge::{RelationDirection, RelationType};
use crate::domain::graph::ClassModel;

/// One class of the hierarchy with its direct subclasses (and realizing classes).
#[derive(Debug, Clone)]
pub struct HierarchyNode<'a> {
    pub class: &'a ClassNode,
    /// Number of classes below this one, counted over the whole subtree.
    pub subtree_classes_count: usize,
    pub children: Vec<HierarchyNode<'a>>,
}

impl HierarchyNode<'_> {
    /// Unprocessed classes are placeholders and render in the muted palette colour.
    pub fn processed(&self) -> bool {
        self.class.relations_processed()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Builds the subtree of `root` following inbound SUPER_CLASS relations depth-first.
/// Children are listed in model ordering.
///
/// Interfaces show their realizing classes here, since a class implementing an interface
/// is recorded as its inbound SUPER_CLASS. Sub-interfaces are not followed.
/// The model must be free of super class cycles (see [`ClassModel::validate_hierarchy`]).
pub fn build_hierarchy(model: &ClassModel, root: ClassId) -> HierarchyNode<'_> {
    let class = model.class(root);
    let mut subs = class
        .relations(RelationType::SuperClass, RelationDirection::Inbound)
        .to_vec();
    subs.sort_by(|&a, &b| model.compare_classes(a, b));
    let children: Vec<HierarchyNode<'_>> = subs
        .into_iter()
        .map(|sub| build_hierarchy(model, sub))
        .collect();
    let subtree_classes_count = children.iter().map(|c| c.subtree_classes_count + 1).sum();
    HierarchyNode {
        class,
        subtree_classes_count,
        children,
    }
}

/// Classes no hierarchy edge leads to, in model ordering: no outbound SUPER_CLASS, and no
/// outbound SUPER_INTERFACE unless the class is itself an interface. Sub-interfaces are not
/// reachable from their super interfaces, so they start trees of their own.
pub fn hierarchy_roots(model: &ClassModel) -> Vec<ClassId> {
    let mut roots: Vec<ClassId> = model
        .classes()
        .filter(|c| {
            c.relations(RelationType::SuperClass, RelationDirection::Outbound).is_empty()
                && (c.is_interface()
                    || c.relations(RelationType::SuperInterface, RelationDirection::Outbound)
                        .is_empty())
        })
        .map(ClassNode::handle)
        .collect();
    roots.sort_by(|&a, &b| model.compare_classes(a, b));
    roots
}

/// One tree per hierarchy root.
pub fn build_forest(model: &ClassModel) -> Vec<HierarchyNode<'_>> {
    hierarchy_roots(model)
        .into_iter()
        .map(|root| build_hierarchy(model, root))
        .collect()
}
