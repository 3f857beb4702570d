use serde::{Deserialize, Serialize};

use crate::domain::class::ClassNode;
use crate::domain::edge::RelationDirection;
use crate::domain::element::{ElementKind, ElementVisibility, ParameterizableElement};
use crate::domain::hierarchy::HierarchyNode;
use crate::domain::members_tree::{GroupMarker, TreeItem, TreeNode};
use crate::domain::style::{Palette, StyledText, TextStyle};
use crate::domain::uml::{RelationSummary, UmlRow, UmlSection, UmlTable, format_count};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub snapshot_path: String,
    pub ordering: String,
    pub class_count: usize,
    pub processed_count: usize,
    pub placeholder_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassesResponse {
    pub items: Vec<ClassRef>,
    pub total: usize,
}

/// Class reference as shown in labels: kind badge, short name, processed flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRef {
    pub id: String,
    pub name: String,
    /// Qualified name with type parameters.
    pub full_name: String,
    pub kind: ElementKind,
    pub symbol: char,
    /// Background colour of the kind badge.
    pub kind_color: String,
    pub processed: bool,
    /// Label colour: black when processed, grey for placeholders.
    pub color: String,
    pub style: StyleDto,
}

impl From<&ClassNode> for ClassRef {
    fn from(class: &ClassNode) -> Self {
        let processed = class.relations_processed();
        Self {
            id: class.core().id.clone(),
            name: class.short_name_with_params(),
            full_name: class.full_name_with_params(),
            kind: class.core().kind,
            symbol: class.core().kind.symbol(),
            kind_color: class.core().kind.color().to_string(),
            processed,
            color: Palette::for_class(processed).color().to_string(),
            style: StyleDto::from(TextStyle::for_element(class.core())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StyleDto {
    pub bold: bool,
    pub underline: bool,
}

impl From<TextStyle> for StyleDto {
    fn from(style: TextStyle) -> Self {
        Self {
            bold: style.bold,
            underline: style.underline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyledTextDto {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub style: StyleDto,
}

impl From<&StyledText> for StyledTextDto {
    fn from(styled: &StyledText) -> Self {
        Self {
            text: styled.text.clone(),
            color: styled.style.color.map(|c| c.to_string()),
            style: StyleDto::from(styled.style),
        }
    }
}

fn styled_list(items: &[StyledText]) -> Vec<StyledTextDto> {
    items.iter().map(StyledTextDto::from).collect()
}

// ─── Hierarchy ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyResponse {
    pub roots: Vec<HierarchyNodeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyNodeDto {
    pub class: ClassRef,
    pub subtree_classes_count: usize,
    pub children: Vec<HierarchyNodeDto>,
}

impl From<&HierarchyNode<'_>> for HierarchyNodeDto {
    fn from(node: &HierarchyNode<'_>) -> Self {
        Self {
            class: ClassRef::from(node.class),
            subtree_classes_count: node.subtree_classes_count,
            children: node.children.iter().map(HierarchyNodeDto::from).collect(),
        }
    }
}

// ─── Members tree ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeItemDto {
    Class {
        class: ClassRef,
    },
    Element {
        id: String,
        kind: ElementKind,
        visibility: ElementVisibility,
        /// `+ name( params ) : Type`
        text: String,
        style: StyleDto,
    },
    Annotation {
        id: String,
        name: String,
    },
    Group {
        marker: String,
        symbol: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<usize>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNodeDto {
    #[serde(flatten)]
    pub item: TreeItemDto,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNodeDto>,
}

impl TreeNodeDto {
    /// Text shown for the node in a plain tree.
    pub fn label(&self) -> String {
        match &self.item {
            TreeItemDto::Class { class } => format!("[{}] {}", class.symbol, class.name),
            TreeItemDto::Element { text, .. } => text.clone(),
            TreeItemDto::Annotation { name, .. } => format!("@{name}"),
            TreeItemDto::Group {
                symbol,
                title,
                count,
                ..
            } => match count {
                Some(count) => format!("{symbol} {title} ({count})"),
                None => format!("{symbol} {title}"),
            },
        }
    }
}

fn marker_name(marker: GroupMarker) -> String {
    match marker {
        GroupMarker::Content => "CONTENT".to_string(),
        GroupMarker::Relations => "RELATIONS".to_string(),
        GroupMarker::Kind(kind) => kind.as_str().to_string(),
        GroupMarker::Relation(relation, direction) => {
            let direction = match direction {
                RelationDirection::Outbound => "OUTBOUND",
                RelationDirection::Inbound => "INBOUND",
            };
            format!("{relation}:{direction}")
        }
    }
}

fn element_item(element: &ParameterizableElement) -> TreeItemDto {
    TreeItemDto::Element {
        id: element.core.id.clone(),
        kind: element.kind(),
        visibility: element.core.visibility,
        text: UmlRow::from_member(element).text(),
        style: StyleDto::from(TextStyle::for_element(&element.core)),
    }
}

impl From<&TreeNode<'_>> for TreeNodeDto {
    fn from(node: &TreeNode<'_>) -> Self {
        let item = match &node.item {
            TreeItem::Class(class) => TreeItemDto::Class {
                class: ClassRef::from(*class),
            },
            TreeItem::Element(element) => element_item(element),
            TreeItem::Annotation(annotation) => TreeItemDto::Annotation {
                id: annotation.id.clone(),
                name: annotation.name.clone(),
            },
            TreeItem::Group(label) => TreeItemDto::Group {
                marker: marker_name(label.marker),
                symbol: label.symbol.clone(),
                title: label.title.clone(),
                color: label.color.map(|c| c.to_string()),
                count: label.count,
            },
        };
        Self {
            item,
            children: node.children.iter().map(TreeNodeDto::from).collect(),
        }
    }
}

// ─── UML ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UmlTableResponse {
    pub class_id: String,
    pub parents: Vec<StyledTextDto>,
    pub stereotypes: Vec<StyledTextDto>,
    pub namespace: Option<String>,
    pub name: StyledTextDto,
    pub sections: Vec<UmlSectionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UmlSectionDto {
    pub kind: ElementKind,
    pub title: StyledTextDto,
    pub rows: Vec<UmlRowDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UmlRowDto {
    pub prelude: Vec<StyledTextDto>,
    pub visibility: Option<char>,
    pub name: String,
    pub parameters: Option<StyledTextDto>,
    pub type_name: Option<StyledTextDto>,
    pub declaration_suffix: Option<String>,
    pub style: StyleDto,
    pub text: String,
}

impl From<&UmlRow> for UmlRowDto {
    fn from(row: &UmlRow) -> Self {
        Self {
            prelude: styled_list(&row.prelude),
            visibility: row.visibility,
            name: row.name.clone(),
            parameters: row.parameters.as_ref().map(StyledTextDto::from),
            type_name: row.type_name.as_ref().map(StyledTextDto::from),
            declaration_suffix: row.declaration_suffix.clone(),
            style: StyleDto::from(row.style),
            text: row.text(),
        }
    }
}

impl From<&UmlSection> for UmlSectionDto {
    fn from(section: &UmlSection) -> Self {
        Self {
            kind: section.kind,
            title: StyledTextDto::from(&section.title),
            rows: section.rows.iter().map(UmlRowDto::from).collect(),
        }
    }
}

impl From<&UmlTable<'_>> for UmlTableResponse {
    fn from(table: &UmlTable<'_>) -> Self {
        Self {
            class_id: table.class.core().id.clone(),
            parents: styled_list(&table.parents),
            stereotypes: styled_list(&table.header.stereotypes),
            namespace: table.header.namespace.clone(),
            name: StyledTextDto::from(&table.header.name),
            sections: table.sections.iter().map(UmlSectionDto::from).collect(),
        }
    }
}

// ─── Summary ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub class_id: String,
    pub full_name_uml: String,
    pub members: usize,
    pub parents: usize,
    pub children: usize,
    pub used_by: usize,
    pub uses: usize,
    /// Display cells in the order members, parents, children, used by, uses. Zero is blank.
    pub cells: [String; 5],
}

impl SummaryResponse {
    pub fn new(class: &ClassNode, summary: RelationSummary) -> Self {
        Self {
            class_id: class.core().id.clone(),
            full_name_uml: class.full_name_uml(),
            members: summary.members,
            parents: summary.parents,
            children: summary.children,
            used_by: summary.used_by,
            uses: summary.uses,
            cells: [
                format_count(summary.members),
                format_count(summary.parents),
                format_count(summary.children),
                format_count(summary.used_by),
                format_count(summary.uses),
            ],
        }
    }
}
