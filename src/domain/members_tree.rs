//! Per-class tree of contents (annotations, members and their details) and relations.

use crate::domain::class::{ClassId, ClassNode};
use crate::domain::edge::{RelationDirection, RelationType};
use crate::domain::element::{Annotation, ElementKind, ParameterizableElement};
use crate::domain::graph::ClassModel;
use crate::domain::style::Rgb;

/// Relation branches of the tree, in display order.
pub const RELATION_GROUPS: [(RelationType, RelationDirection, &str); 14] = [
    (RelationType::SuperClass, RelationDirection::Outbound, "Generalization (SuperClass)"),
    (RelationType::SuperInterface, RelationDirection::Outbound, "Abstractions (SuperInterfaces)"),
    (RelationType::SuperInterface, RelationDirection::Inbound, "Specializations (SubInterfaces)"),
    (RelationType::SuperClass, RelationDirection::Inbound, "Specializations/Realizations (SubClasses)"),
    (RelationType::InnerClass, RelationDirection::Outbound, "Nestings (Inner Classes)"),
    (RelationType::Association, RelationDirection::Outbound, "Associations (Uses)"),
    (RelationType::Dependency, RelationDirection::Outbound, "Dependencies (Uses)"),
    (RelationType::DependencyAnnotation, RelationDirection::Outbound, "Dependencies (Annotations)"),
    (RelationType::DependencyThrows, RelationDirection::Outbound, "Dependencies (Throws)"),
    (RelationType::InnerClass, RelationDirection::Inbound, "Nesting Owner (Outer Class)"),
    (RelationType::Association, RelationDirection::Inbound, "Association Usages (Used By)"),
    (RelationType::Dependency, RelationDirection::Inbound, "Dependency Usages (Used By)"),
    (RelationType::DependencyAnnotation, RelationDirection::Inbound, "Dependency Usages (Annotated)"),
    (RelationType::DependencyThrows, RelationDirection::Inbound, "Dependency Usages (Thrown By)"),
];

/// What a grouping node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupMarker {
    Content,
    Relations,
    Kind(ElementKind),
    Relation(RelationType, RelationDirection),
}

/// Label of a grouping node. Branches of elements carry their element count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLabel {
    pub marker: GroupMarker,
    pub symbol: String,
    pub title: String,
    pub color: Option<Rgb>,
    pub count: Option<usize>,
}

impl GroupLabel {
    fn top(marker: GroupMarker, symbol: &str, title: &str) -> Self {
        Self {
            marker,
            symbol: symbol.to_string(),
            title: title.to_string(),
            color: None,
            count: None,
        }
    }

    fn kind(kind: ElementKind, count: usize) -> Self {
        Self {
            marker: GroupMarker::Kind(kind),
            symbol: kind.symbol().to_string(),
            title: kind.as_str().to_string(),
            color: Some(kind.color()),
            count: Some(count),
        }
    }

    fn relation(relation: RelationType, direction: RelationDirection, title: &str, count: usize) -> Self {
        Self {
            marker: GroupMarker::Relation(relation, direction),
            symbol: relation.symbol(direction).to_string(),
            title: title.to_string(),
            color: Some(relation.color()),
            count: Some(count),
        }
    }

    /// Plain-text rendering: `symbol title (count)`.
    pub fn text(&self) -> String {
        match self.count {
            Some(count) => format!("{} {} ({})", self.symbol, self.title, count),
            None => format!("{} {}", self.symbol, self.title),
        }
    }
}

#[derive(Debug, Clone)]
pub enum TreeItem<'a> {
    Class(&'a ClassNode),
    Element(&'a ParameterizableElement),
    Annotation(&'a Annotation),
    Group(GroupLabel),
}

#[derive(Debug, Clone)]
pub struct TreeNode<'a> {
    pub item: TreeItem<'a>,
    pub children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    fn leaf(item: TreeItem<'a>) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }

    pub fn group_label(&self) -> Option<&GroupLabel> {
        match &self.item {
            TreeItem::Group(label) => Some(label),
            _ => None,
        }
    }

    /// Direct child group with the given marker.
    pub fn group(&self, marker: GroupMarker) -> Option<&TreeNode<'a>> {
        self.children
            .iter()
            .find(|c| c.group_label().is_some_and(|l| l.marker == marker))
    }
}

/// Builds the member/relations tree of one class. Empty branches are left out, as is a top
/// group without branches.
pub fn build_members_tree(model: &ClassModel, class: ClassId) -> TreeNode<'_> {
    let node = model.class(class);
    let mut root = TreeNode::leaf(TreeItem::Class(node));

    let mut content = TreeNode::leaf(TreeItem::Group(GroupLabel::top(
        GroupMarker::Content,
        "\u{220b}",
        "Content",
    )));
    content.children.extend(annotations_branch(node.annotations()));
    for (kind, members) in node.member_kinds() {
        content.children.extend(elements_branch(kind, members));
    }
    if !content.children.is_empty() {
        root.children.push(content);
    }

    let mut relations = TreeNode::leaf(TreeItem::Group(GroupLabel::top(
        GroupMarker::Relations,
        "\u{2194}",
        "Relations",
    )));
    for (relation, direction, title) in RELATION_GROUPS {
        let mut targets = node.relations(relation, direction).to_vec();
        if targets.is_empty() {
            continue;
        }
        // Open inbound cells are in construction order
        targets.sort_by(|&a, &b| model.compare_classes(a, b));
        relations.children.push(TreeNode {
            item: TreeItem::Group(GroupLabel::relation(relation, direction, title, targets.len())),
            children: targets
                .into_iter()
                .map(|target| TreeNode::leaf(TreeItem::Class(model.class(target))))
                .collect(),
        });
    }
    if !relations.children.is_empty() {
        root.children.push(relations);
    }

    root
}

fn annotations_branch(annotations: &[Annotation]) -> Option<TreeNode<'_>> {
    if annotations.is_empty() {
        return None;
    }
    Some(TreeNode {
        item: TreeItem::Group(GroupLabel::kind(ElementKind::Annotations, annotations.len())),
        children: annotations
            .iter()
            .map(|a| TreeNode::leaf(TreeItem::Annotation(a)))
            .collect(),
    })
}

fn elements_branch(kind: ElementKind, elements: &[ParameterizableElement]) -> Option<TreeNode<'_>> {
    if elements.is_empty() {
        return None;
    }
    Some(TreeNode {
        item: TreeItem::Group(GroupLabel::kind(kind, elements.len())),
        children: elements.iter().map(element_node).collect(),
    })
}

fn element_node(element: &ParameterizableElement) -> TreeNode<'_> {
    let mut node = TreeNode::leaf(TreeItem::Element(element));
    node.children.extend(annotations_branch(&element.annotations));
    if let Some(op) = element.as_operation() {
        node.children
            .extend(elements_branch(ElementKind::Parameters, &op.parameters));
        node.children
            .extend(elements_branch(ElementKind::Throws, &op.throwables));
    }
    node
}
