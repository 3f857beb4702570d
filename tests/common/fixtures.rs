//! Test fixture generators for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use class_structure::domain::edge::RelationType;
use class_structure::domain::element::{
    Annotation, ElementKind, ElementModifier, ElementVisibility, LangElement,
    ParameterizableElement, TypeDescriptor,
};
use class_structure::domain::semantic::{ClassDeclaration, TypeSystemSnapshot};

fn field(name: &str, ty: &str, visibility: ElementVisibility) -> ParameterizableElement {
    ParameterizableElement::new(LangElement::new("", name, ElementKind::Fields, visibility))
        .with_type(TypeDescriptor::new(ty))
}

fn constant(name: &str, ty: &str, value: &str) -> ParameterizableElement {
    ParameterizableElement::new(
        LangElement::new("", name, ElementKind::Constants, ElementVisibility::Public)
            .with_modifiers([ElementModifier::Static, ElementModifier::Final]),
    )
    .with_type(TypeDescriptor::new(ty))
    .with_declaration_suffix(format!(" = {value}"))
}

fn parameter(name: &str, ty: &str) -> ParameterizableElement {
    ParameterizableElement::new(LangElement::new(
        "",
        name,
        ElementKind::Parameters,
        ElementVisibility::Local,
    ))
    .with_type(TypeDescriptor::new(ty))
}

fn thrown(id: &str) -> ParameterizableElement {
    let name = id.rsplit('.').next().unwrap_or(id);
    ParameterizableElement::new(LangElement::new(
        id,
        name,
        ElementKind::Throws,
        ElementVisibility::Public,
    ))
}

fn method(
    name: &str,
    ret: &str,
    modifiers: &[ElementModifier],
    parameters: Vec<ParameterizableElement>,
    throwables: Vec<ParameterizableElement>,
) -> ParameterizableElement {
    ParameterizableElement::operation(
        LangElement::new("", name, ElementKind::Methods, ElementVisibility::Public)
            .with_modifiers(modifiers.iter().copied()),
        parameters,
        throwables,
    )
    .with_type(TypeDescriptor::new(ret))
}

fn constructor(name: &str, parameters: Vec<ParameterizableElement>) -> ParameterizableElement {
    ParameterizableElement::operation(
        LangElement::new("", name, ElementKind::Constructors, ElementVisibility::Public),
        parameters,
        vec![],
    )
}

/// A small geometry library:
///
/// ```text
/// java.lang.Object (placeholder)
///   geo.AbstractShape (abstract, implements geo.Shape)
///     geo.Circle (final, implements geo.Drawable, nests geo.Circle$Builder)
///     geo.Square
/// geo.Drawable extends geo.Shape
/// geo.Canvas uses geo.Shape and geo.Circle, throws geo.ShapeException
/// geo.ShapeException extends java.lang.Exception (placeholder)
/// ```
pub fn shapes_snapshot() -> TypeSystemSnapshot {
    TypeSystemSnapshot {
        classes: vec![
            ClassDeclaration::new("geo.Shape", ElementKind::Interface)
                .with_modifiers([ElementModifier::Abstract])
                .with_member(method("area", "double", &[ElementModifier::Abstract], vec![], vec![])),
            ClassDeclaration::new("geo.Drawable", ElementKind::Interface)
                .with_modifiers([ElementModifier::Abstract])
                .with_interface("geo.Shape")
                .with_member(method(
                    "draw",
                    "void",
                    &[ElementModifier::Abstract],
                    vec![parameter("canvas", "geo.Canvas")],
                    vec![],
                )),
            ClassDeclaration::new("geo.AbstractShape", ElementKind::Class)
                .with_modifiers([ElementModifier::Abstract])
                .with_super_class("java.lang.Object")
                .with_interface("geo.Shape")
                .with_member(field("name", "java.lang.String", ElementVisibility::Protected))
                .with_member(constructor(
                    "AbstractShape",
                    vec![parameter("name", "java.lang.String")],
                )),
            circle(),
            ClassDeclaration::new("geo.Circle$Builder", ElementKind::Class)
                .with_modifiers([ElementModifier::Static])
                .with_member(method("build", "geo.Circle", &[], vec![], vec![]))
                .with_relation(RelationType::Association, "geo.Circle"),
            ClassDeclaration::new("geo.Square", ElementKind::Class)
                .with_super_class("geo.AbstractShape")
                .with_member(field("side", "double", ElementVisibility::Private)),
            ClassDeclaration::new("geo.Canvas", ElementKind::Class)
                .with_member(field(
                    "shapes",
                    "java.util.List<geo.Shape>",
                    ElementVisibility::Private,
                ))
                .with_member(method(
                    "paint",
                    "void",
                    &[],
                    vec![],
                    vec![thrown("geo.ShapeException")],
                ))
                .with_relation(RelationType::Association, "geo.Shape")
                .with_relation(RelationType::Dependency, "geo.Shape")
                .with_relation(RelationType::Dependency, "geo.Circle")
                .with_relation(RelationType::Association, "geo.Circle")
                .with_relation(RelationType::DependencyThrows, "geo.ShapeException"),
            ClassDeclaration::new("geo.ShapeException", ElementKind::Throwable)
                .with_super_class("java.lang.Exception"),
            ClassDeclaration::new("geo.Immutable", ElementKind::AnnotationType)
                .with_modifiers([ElementModifier::Annotation]),
        ],
    }
}

fn circle() -> ClassDeclaration {
    let mut circle = ClassDeclaration::new("geo.Circle", ElementKind::Class)
        .with_modifiers([ElementModifier::Final])
        .with_super_class("geo.AbstractShape")
        .with_interface("geo.Drawable")
        .with_member(method("draw", "void", &[], vec![parameter("canvas", "geo.Canvas")], vec![]))
        .with_member(field("radius", "double", ElementVisibility::Private))
        .with_member(method("area", "double", &[], vec![], vec![]))
        .with_member(constant("PI", "double", "3.14"))
        .with_relation(RelationType::InnerClass, "geo.Circle$Builder")
        .with_relation(RelationType::DependencyThrows, "geo.ShapeException")
        .with_relation(RelationType::DependencyAnnotation, "geo.Immutable");
    circle.annotations = vec![Annotation::new("geo.Immutable", "Immutable")];
    circle
}

/// Two classes extending each other.
pub fn cyclic_snapshot() -> TypeSystemSnapshot {
    TypeSystemSnapshot {
        classes: vec![
            ClassDeclaration::new("loop.A", ElementKind::Class).with_super_class("loop.B"),
            ClassDeclaration::new("loop.B", ElementKind::Class).with_super_class("loop.A"),
        ],
    }
}

/// Writes a snapshot as JSON into `dir` and returns the file path.
pub fn write_snapshot(dir: &Path, name: &str, snapshot: &TypeSystemSnapshot) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(snapshot).expect("serialize snapshot");
    std::fs::write(&path, json).expect("write snapshot");
    path
}
