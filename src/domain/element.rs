//! Language elements: the named constructs of an object-oriented type system, and the static
//! registries (kind, visibility, modifier) describing them.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::style::Rgb;

/// Structural role of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    // ============ Class-like ============
    Class,
    Interface,
    Enum,
    AnnotationType,
    Throwable,

    // ============ Super types ============
    Extends,
    Implements,

    // ============ Members ============
    Constants,
    Fields,
    Properties,
    Constructors,
    Methods,

    // ============ Member details ============
    Annotations,
    Parameters,
    Throws,
}

impl ElementKind {
    /// Kinds guaranteed to be present (possibly empty) once a class finished its members.
    pub const MEMBER_KINDS: [ElementKind; 7] = [
        ElementKind::Extends,
        ElementKind::Implements,
        ElementKind::Constants,
        ElementKind::Fields,
        ElementKind::Properties,
        ElementKind::Constructors,
        ElementKind::Methods,
    ];

    /// Member kinds shown in UML tables, in display order.
    pub const UML_KINDS: [ElementKind; 5] = [
        ElementKind::Constants,
        ElementKind::Fields,
        ElementKind::Properties,
        ElementKind::Constructors,
        ElementKind::Methods,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Class => "CLASS",
            ElementKind::Interface => "INTERFACE",
            ElementKind::Enum => "ENUM",
            ElementKind::AnnotationType => "ANNOTATION_TYPE",
            ElementKind::Throwable => "THROWABLE",
            ElementKind::Extends => "EXTENDS",
            ElementKind::Implements => "IMPLEMENTS",
            ElementKind::Constants => "CONSTANTS",
            ElementKind::Fields => "FIELDS",
            ElementKind::Properties => "PROPERTIES",
            ElementKind::Constructors => "CONSTRUCTORS",
            ElementKind::Methods => "METHODS",
            ElementKind::Annotations => "ANNOTATIONS",
            ElementKind::Parameters => "PARAMETERS",
            ElementKind::Throws => "THROWS",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            ElementKind::Class => Rgb(0xFFF2CC),
            ElementKind::Interface => Rgb(0xCCFFCC),
            ElementKind::Enum => Rgb(0xCCCCFF),
            ElementKind::AnnotationType => Rgb(0xFECCFF),
            ElementKind::Throwable => Rgb(0xFF9F80),
            ElementKind::Extends => Rgb(0x4F4F4F),
            ElementKind::Implements => Rgb(0xA9A9A9),
            ElementKind::Constants => Rgb(0xFF6F60),
            ElementKind::Fields => Rgb(0xA0C9E8),
            ElementKind::Properties => Rgb(0x4A72A1),
            ElementKind::Constructors => Rgb(0xFFA500),
            ElementKind::Methods => Rgb(0xFF00FF),
            ElementKind::Annotations => Rgb(0xFECCFF),
            ElementKind::Parameters => Rgb(0x008080),
            ElementKind::Throws => Rgb(0xA90000),
        }
    }

    /// Class-like kinds are drawn as a letter on their colour, member kinds as a glyph.
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            ElementKind::Class
                | ElementKind::Interface
                | ElementKind::Enum
                | ElementKind::AnnotationType
                | ElementKind::Throwable
        )
    }

    pub fn symbol(self) -> char {
        match self {
            ElementKind::Extends | ElementKind::Implements => '\u{25b2}',
            ElementKind::Constants | ElementKind::Fields | ElementKind::Properties => '\u{25a0}',
            ElementKind::Constructors | ElementKind::Methods => '\u{2666}',
            ElementKind::Annotations | ElementKind::Parameters | ElementKind::Throws => '\u{25cf}',
            class_like => class_like.as_str().chars().next().unwrap_or('?'),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementVisibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
    Local,
}

impl ElementVisibility {
    /// UML symbol; local elements have none.
    pub fn symbol(self) -> Option<char> {
        match self {
            ElementVisibility::Public => Some('+'),
            ElementVisibility::Protected => Some('#'),
            ElementVisibility::Package => Some('~'),
            ElementVisibility::Private => Some('-'),
            ElementVisibility::Local => None,
        }
    }
}

/// Modifiers of a language element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementModifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strict,
    ReadOnly,
    Interface,
    Enum,
    Annotation,
    Record,
    Sealed,
    Throwable,
    LocalClass,
    MemberClass,
    Synthetic,
    Bridge,
    Default,
    Implicit,
    VarArgs,
}

impl ElementModifier {
    pub fn display_name(self) -> &'static str {
        match self {
            ElementModifier::Public => "public",
            ElementModifier::Protected => "protected",
            ElementModifier::Private => "private",
            ElementModifier::Abstract => "abstract",
            ElementModifier::Static => "static",
            ElementModifier::Final => "final",
            ElementModifier::Transient => "transient",
            ElementModifier::Volatile => "volatile",
            ElementModifier::Synchronized => "synchronized",
            ElementModifier::Native => "native",
            ElementModifier::Strict => "strict",
            ElementModifier::ReadOnly => "readOnly",
            ElementModifier::Interface => "interface",
            ElementModifier::Enum => "enum",
            ElementModifier::Annotation => "annotation",
            ElementModifier::Record => "record",
            ElementModifier::Sealed => "sealed",
            ElementModifier::Throwable => "throwable",
            ElementModifier::LocalClass => "localClass",
            ElementModifier::MemberClass => "memberClass",
            ElementModifier::Synthetic => "synthetic",
            ElementModifier::Bridge => "bridge",
            ElementModifier::Default => "default",
            ElementModifier::Implicit => "implicit",
            ElementModifier::VarArgs => "varArgs",
        }
    }

    pub fn is_visibility(self) -> bool {
        matches!(
            self,
            ElementModifier::Public | ElementModifier::Protected | ElementModifier::Private
        )
    }

    /// Modifiers rendered as «stereotypes». Visibility has its own symbol and
    /// abstract/static are expressed through text style.
    pub fn is_stereotype(self) -> bool {
        !self.is_visibility() && !matches!(self, ElementModifier::Abstract | ElementModifier::Static)
    }
}

impl fmt::Display for ElementModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn qualifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+[.$]").expect("qualifier regex"))
}

/// Strips package and outer-class qualifiers from every type name in `name`
/// (`java.util.Map$Entry<java.lang.String, V>` → `Entry<String, V>`).
/// A qualifier followed by a digit is kept so anonymous classes stay readable (`Outer$1`).
pub fn strip_qualifiers(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last = 0;
    for m in qualifier_regex().find_iter(name) {
        out.push_str(&name[last..m.start()]);
        if name[m.end()..].starts_with(|c: char| c.is_ascii_digit()) {
            out.push_str(m.as_str());
        }
        last = m.end();
    }
    out.push_str(&name[last..]);
    out
}

/// Type reference supplied by the extractor: a name plus ordered bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: Vec<TypeDescriptor>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn short_name(&self) -> String {
        strip_qualifiers(&self.name)
    }

    /// Declaration form used for type parameters: `T extends A & B`.
    pub fn declaration(&self) -> String {
        if self.bounds.is_empty() {
            return self.name.clone();
        }
        let bounds: Vec<&str> = self.bounds.iter().map(|b| b.name.as_str()).collect();
        format!("{} extends {}", self.name, bounds.join(" & "))
    }
}

/// Renders `<T, U extends Bound>`, or an empty string for non-generic declarations.
pub fn type_parameters_declaration(parameters: &[TypeDescriptor]) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let declared: Vec<String> = parameters.iter().map(TypeDescriptor::declaration).collect();
    format!("<{}>", declared.join(", "))
}

/// Base attributes shared by every named construct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangElement {
    /// Globally unique qualified name.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub visibility: ElementVisibility,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub modifiers: BTreeSet<ElementModifier>,
}

impl LangElement {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ElementKind,
        visibility: ElementVisibility,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            visibility,
            modifiers: BTreeSet::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = ElementModifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn has_modifier(&self, modifier: ElementModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_abstract(&self) -> bool {
        self.has_modifier(ElementModifier::Abstract)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier(ElementModifier::Static)
    }

    pub fn stereotypes(&self) -> Vec<&'static str> {
        self.modifiers
            .iter()
            .filter(|m| m.is_stereotype())
            .map(|m| m.display_name())
            .collect()
    }
}

/// Reference to an annotation type applied to an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Annotation {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Operation-specific details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDetails {
    #[serde(default)]
    pub parameters: Vec<ParameterizableElement>,
    #[serde(default)]
    pub throwables: Vec<ParameterizableElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementDetails {
    #[default]
    Plain,
    Operation(OperationDetails),
}

/// A language element that carries annotations and takes part in member ordering.
/// Fields, constants, properties, parameters and operations are all of this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterizableElement {
    #[serde(flatten)]
    pub core: LangElement,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// Declared type (field type, return type, parameter type).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_descriptor: Option<TypeDescriptor>,
    /// Free text appended after the type, e.g. a constant's value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_suffix: Option<String>,
    #[serde(default)]
    pub details: ElementDetails,
}

impl ParameterizableElement {
    pub fn new(core: LangElement) -> Self {
        Self {
            core,
            annotations: Vec::new(),
            type_descriptor: None,
            declaration_suffix: None,
            details: ElementDetails::Plain,
        }
    }

    pub fn operation(
        core: LangElement,
        parameters: Vec<ParameterizableElement>,
        throwables: Vec<ParameterizableElement>,
    ) -> Self {
        Self {
            details: ElementDetails::Operation(OperationDetails {
                parameters,
                throwables,
            }),
            ..Self::new(core)
        }
    }

    pub fn with_type(mut self, type_descriptor: TypeDescriptor) -> Self {
        self.type_descriptor = Some(type_descriptor);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_declaration_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.declaration_suffix = Some(suffix.into());
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.core.kind
    }

    pub fn as_operation(&self) -> Option<&OperationDetails> {
        match &self.details {
            ElementDetails::Operation(op) => Some(op),
            ElementDetails::Plain => None,
        }
    }

    pub fn short_type_name(&self) -> Option<String> {
        self.type_descriptor.as_ref().map(TypeDescriptor::short_name)
    }

    /// `name : Type` pairs of an operation's parameters, comma separated.
    pub fn parameters_as_string(&self) -> Option<String> {
        let op = self.as_operation()?;
        let rendered: Vec<String> = op
            .parameters
            .iter()
            .map(|p| match p.short_type_name() {
                Some(ty) => format!("{} : {}", p.core.name, ty),
                None => p.core.name.clone(),
            })
            .collect();
        Some(rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_qualifiers_removes_packages_and_outer_classes() {
        assert_eq!(strip_qualifiers("java.util.Map$Entry"), "Entry");
        assert_eq!(
            strip_qualifiers("java.util.List<java.lang.String>"),
            "List<String>"
        );
        assert_eq!(strip_qualifiers("Plain"), "Plain");
    }

    #[test]
    fn test_strip_qualifiers_keeps_anonymous_class_numbers() {
        assert_eq!(strip_qualifiers("com.acme.Outer$1"), "Outer$1");
    }

    #[test]
    fn test_kind_symbols() {
        assert_eq!(ElementKind::Interface.symbol(), 'I');
        assert_eq!(ElementKind::AnnotationType.symbol(), 'A');
        assert_eq!(ElementKind::Methods.symbol(), '\u{2666}');
        assert!(ElementKind::Throwable.is_class_like());
        assert!(!ElementKind::Fields.is_class_like());
    }

    #[test]
    fn test_stereotypes_skip_visibility_abstract_and_static() {
        let element = LangElement::new("a.B", "B", ElementKind::Class, ElementVisibility::Public)
            .with_modifiers([
                ElementModifier::Public,
                ElementModifier::Abstract,
                ElementModifier::Static,
                ElementModifier::Final,
                ElementModifier::ReadOnly,
            ]);
        assert_eq!(element.stereotypes(), vec!["final", "readOnly"]);
        assert!(element.is_abstract());
        assert!(element.is_static());
    }

    #[test]
    fn test_type_parameters_declaration() {
        let params = vec![
            TypeDescriptor::new("K"),
            TypeDescriptor::new("V").with_bounds(vec![
                TypeDescriptor::new("java.lang.Comparable<V>"),
                TypeDescriptor::new("java.io.Serializable"),
            ]),
        ];
        assert_eq!(
            type_parameters_declaration(&params),
            "<K, V extends java.lang.Comparable<V> & java.io.Serializable>"
        );
        assert_eq!(type_parameters_declaration(&[]), "");
    }

    #[test]
    fn test_operation_parameters_as_string() {
        let param = ParameterizableElement::new(LangElement::new(
            "",
            "count",
            ElementKind::Parameters,
            ElementVisibility::Local,
        ))
        .with_type(TypeDescriptor::new("java.lang.Integer"));
        let op = ParameterizableElement::operation(
            LangElement::new("a.B.run", "run", ElementKind::Methods, ElementVisibility::Public),
            vec![param],
            vec![],
        );
        assert_eq!(op.parameters_as_string().as_deref(), Some("count : Integer"));

        let field = ParameterizableElement::new(LangElement::new(
            "a.B.x",
            "x",
            ElementKind::Fields,
            ElementVisibility::Private,
        ));
        assert!(field.parameters_as_string().is_none());
    }

    #[test]
    fn test_member_deserializes_with_defaults() {
        let json = r#"{"name": "size", "kind": "FIELDS", "type": {"name": "int"}}"#;
        let member: ParameterizableElement = serde_json::from_str(json).unwrap();
        assert_eq!(member.core.visibility, ElementVisibility::Public);
        assert!(member.core.id.is_empty());
        assert_eq!(member.details, ElementDetails::Plain);
        assert_eq!(member.short_type_name().as_deref(), Some("int"));
    }
}
