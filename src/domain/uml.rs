//! UML attribute/operation table and relation-count summary of a class.

use crate::domain::class::{ClassId, ClassNode};
use crate::domain::edge::{RelationDirection, RelationType};
use crate::domain::element::{Annotation, ElementKind, LangElement, ParameterizableElement};
use crate::domain::graph::ClassModel;
use crate::domain::style::{Palette, StyledText, TextStyle};

/// UML class box: parent names above the header, then one section per member kind.
#[derive(Debug, Clone)]
pub struct UmlTable<'a> {
    pub class: &'a ClassNode,
    /// Super class, or the super interfaces when there is none.
    pub parents: Vec<StyledText>,
    pub header: UmlHeader,
    pub sections: Vec<UmlSection>,
}

#[derive(Debug, Clone)]
pub struct UmlHeader {
    /// Class annotations and modifier stereotypes, each as `«name»`.
    pub stereotypes: Vec<StyledText>,
    /// UML namespace with trailing separator (`a::b::`).
    pub namespace: Option<String>,
    /// Short name with type parameters.
    pub name: StyledText,
}

#[derive(Debug, Clone)]
pub struct UmlSection {
    pub kind: ElementKind,
    pub title: StyledText,
    pub rows: Vec<UmlRow>,
}

/// One member line.
#[derive(Debug, Clone)]
pub struct UmlRow {
    /// Modifier stereotypes followed by annotations, shown on their own line when present.
    pub prelude: Vec<StyledText>,
    pub visibility: Option<char>,
    pub name: String,
    /// Parameter list of an operation.
    pub parameters: Option<StyledText>,
    pub type_name: Option<StyledText>,
    pub declaration_suffix: Option<String>,
    pub style: TextStyle,
}

impl UmlRow {
    pub fn from_member(member: &ParameterizableElement) -> Self {
        let mut prelude = stereotypes(&member.core);
        prelude.extend(annotations(&member.annotations));
        Self {
            prelude,
            visibility: member.core.visibility.symbol(),
            name: member.core.name.clone(),
            parameters: member.parameters_as_string().map(|params| {
                StyledText::new(params, TextStyle::default().with_color(Palette::UmlParams.color()))
            }),
            type_name: member.short_type_name().map(|ty| {
                StyledText::new(ty, TextStyle::default().with_color(Palette::UmlType.color()))
            }),
            declaration_suffix: member.declaration_suffix.clone(),
            style: TextStyle::for_element(&member.core),
        }
    }

    /// Plain-text form: `+ name( params ) : Type suffix`.
    pub fn text(&self) -> String {
        let mut line = String::new();
        if let Some(symbol) = self.visibility {
            line.push(symbol);
            line.push(' ');
        }
        line.push_str(&self.name);
        if let Some(params) = &self.parameters {
            line.push_str("( ");
            line.push_str(&params.text);
            line.push_str(" )");
        }
        if let Some(ty) = &self.type_name {
            line.push_str(" : ");
            line.push_str(&ty.text);
        }
        if let Some(suffix) = &self.declaration_suffix {
            line.push_str(suffix);
        }
        line
    }
}

pub fn build_uml_table(model: &ClassModel, class: ClassId) -> UmlTable<'_> {
    let node = model.class(class);

    let mut parents = node.relations(RelationType::SuperClass, RelationDirection::Outbound);
    if parents.is_empty() {
        parents = node.relations(RelationType::SuperInterface, RelationDirection::Outbound);
    }
    let parents = parents
        .iter()
        .map(|&p| {
            let parent = model.class(p);
            StyledText::new(parent.short_name_with_params(), TextStyle::for_element(parent.core()))
        })
        .collect();

    let mut header_stereotypes = annotations(node.annotations());
    header_stereotypes.extend(stereotypes(node.core()));
    let header = UmlHeader {
        stereotypes: header_stereotypes,
        namespace: node.namespace_uml(),
        name: StyledText::new(
            node.short_name_with_params(),
            TextStyle::for_element(node.core()).with_color(Palette::UmlClassName.color()),
        ),
    };

    let sections = ElementKind::UML_KINDS
        .into_iter()
        .filter_map(|kind| {
            let members = node.members(kind);
            if members.is_empty() {
                return None;
            }
            Some(UmlSection {
                kind,
                title: StyledText::new(
                    kind.as_str(),
                    TextStyle::default().with_color(Palette::UmlSectionTitle.color()),
                ),
                rows: members.iter().map(UmlRow::from_member).collect(),
            })
        })
        .collect();

    UmlTable {
        class: node,
        parents,
        header,
        sections,
    }
}

fn stereotype_style() -> TextStyle {
    TextStyle::default().with_color(Palette::UmlStereotype.color())
}

fn stereotypes(element: &LangElement) -> Vec<StyledText> {
    element
        .stereotypes()
        .into_iter()
        .map(|s| StyledText::new(format!("\u{ab}{s}\u{bb}"), stereotype_style()))
        .collect()
}

fn annotations(annotations: &[Annotation]) -> Vec<StyledText> {
    annotations
        .iter()
        .map(|a| StyledText::new(format!("\u{ab}{}\u{bb}", a.name), stereotype_style()))
        .collect()
}

/// Relation counts of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationSummary {
    pub members: usize,
    pub parents: usize,
    pub children: usize,
    pub used_by: usize,
    pub uses: usize,
}

pub fn build_relation_summary(model: &ClassModel, class: ClassId) -> RelationSummary {
    let node = model.class(class);
    let count = |relation, direction| node.relations(relation, direction).len();
    let usage = |direction| {
        node.checked_targets(direction)
            + count(RelationType::DependencyThrows, direction)
            + count(RelationType::DependencyAnnotation, direction)
    };
    RelationSummary {
        members: ElementKind::UML_KINDS
            .into_iter()
            .map(|kind| node.members(kind).len())
            .sum(),
        parents: count(RelationType::SuperClass, RelationDirection::Outbound)
            + count(RelationType::SuperInterface, RelationDirection::Outbound),
        children: count(RelationType::SuperClass, RelationDirection::Inbound)
            + count(RelationType::SuperInterface, RelationDirection::Inbound),
        used_by: usage(RelationDirection::Inbound),
        uses: usage(RelationDirection::Outbound),
    }
}

/// Zero renders as a blank cell.
pub fn format_count(count: usize) -> String {
    if count > 0 {
        count.to_string()
    } else {
        " ".to_string()
    }
}
