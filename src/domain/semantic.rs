//! Extraction snapshot: contract between a type-system extractor and the class model.
//!
//! An extractor (reflection walker, source indexer, test fixture) describes every class it
//! visited as a [`ClassDeclaration`]. Targets referenced by super types or relations do not
//! need a declaration of their own; the model builder turns them into unprocessed
//! placeholder classes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::edge::RelationType;
use crate::domain::element::{
    Annotation, ElementKind, ElementModifier, ElementVisibility, LangElement,
    ParameterizableElement, TypeDescriptor,
};

/// Whole type system as handed over by an extractor.
///
/// Declaration order is significant: it is the insertion order of relation collections
/// until they are frozen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSystemSnapshot {
    #[serde(default)]
    pub classes: Vec<ClassDeclaration>,
}

/// One visited class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// Fully qualified name, unique across the snapshot.
    pub id: String,
    /// Simple name; derived from `id` when omitted.
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_class_kind")]
    pub kind: ElementKind,
    #[serde(default)]
    pub visibility: ElementVisibility,
    #[serde(default)]
    pub modifiers: BTreeSet<ElementModifier>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub type_parameters: Vec<TypeDescriptor>,
    /// Qualified name of the super class.
    #[serde(default)]
    pub super_class: Option<String>,
    /// Qualified names of implemented (or, for interfaces, extended) interfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Members in extraction order. Empty member ids default to `{class}.{name}`.
    #[serde(default)]
    pub members: Vec<ParameterizableElement>,
    #[serde(default)]
    pub relations: Vec<RelationDeclaration>,
}

fn default_class_kind() -> ElementKind {
    ElementKind::Class
}

/// Outbound relation of the declaring class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDeclaration {
    pub relation: RelationType,
    pub target: String,
}

impl ClassDeclaration {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            visibility: ElementVisibility::Public,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            type_parameters: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Simple name, falling back to the last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        simple_name_of(&self.id)
    }

    /// Interfaces are recognised by kind or by the INTERFACE modifier.
    pub fn is_interface(&self) -> bool {
        self.kind == ElementKind::Interface || self.modifiers.contains(&ElementModifier::Interface)
    }

    /// Class element with the INTERFACE modifier added for interface kinds.
    pub fn to_element(&self) -> ParameterizableElement {
        let mut core = LangElement::new(
            self.id.clone(),
            self.simple_name(),
            self.kind,
            self.visibility,
        )
        .with_modifiers(self.modifiers.iter().copied());
        if self.is_interface() {
            core.modifiers.insert(ElementModifier::Interface);
        }
        ParameterizableElement::new(core).with_annotations(self.annotations.clone())
    }

    /// Member with its id filled in.
    pub fn member_element(&self, member: &ParameterizableElement) -> ParameterizableElement {
        let mut member = member.clone();
        if member.core.id.is_empty() {
            member.core.id = format!("{}.{}", self.id, member.core.name);
        }
        member
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = ElementModifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn with_super_class(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_member(mut self, member: ParameterizableElement) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_relation(mut self, relation: RelationType, target: impl Into<String>) -> Self {
        self.relations.push(RelationDeclaration {
            relation,
            target: target.into(),
        });
        self
    }
}

/// Last segment of a qualified name, keeping outer-class separators (`Map$Entry`).
pub fn simple_name_of(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}
