use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::class::ClassId;
use crate::domain::edge::RelationType;
use crate::domain::element::{
    ElementKind, ElementModifier, ElementVisibility, LangElement, ParameterizableElement,
};
use crate::domain::graph::ClassModel;
use crate::domain::policy::ElementOrdering;
use crate::domain::semantic::{TypeSystemSnapshot, simple_name_of};

/// Model builder - Domain Service replaying an extraction snapshot into a [`ClassModel`]
pub struct ModelBuilder {
    ordering: Arc<dyn ElementOrdering>,
}

/// Counters reported after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub declared: usize,
    pub placeholders: usize,
    pub members: usize,
    pub relations: usize,
}

impl ModelBuilder {
    pub fn new(ordering: Arc<dyn ElementOrdering>) -> Self {
        Self { ordering }
    }

    pub fn build(&self, snapshot: &TypeSystemSnapshot) -> Result<ClassModel> {
        self.build_with_stats(snapshot).map(|(model, _)| model)
    }

    /// Five-pass build strategy
    pub fn build_with_stats(&self, snapshot: &TypeSystemSnapshot) -> Result<(ClassModel, BuildStats)> {
        let mut model = ClassModel::new(Arc::clone(&self.ordering));
        let mut stats = BuildStats::default();

        // Pass 1: Class Allocation
        let mut declared: Vec<ClassId> = Vec::with_capacity(snapshot.classes.len());
        for declaration in &snapshot.classes {
            let handle = model
                .add_class(declaration.to_element(), declaration.type_parameters.clone())
                .with_context(|| format!("Invalid snapshot: duplicate class {}", declaration.id))?;
            declared.push(handle);
        }
        stats.declared = declared.len();

        // Pass 2: Member and Relation Wiring
        for (declaration, &source) in snapshot.classes.iter().zip(&declared) {
            for member in &declaration.members {
                model.add_member(source, declaration.member_element(member));
                stats.members += 1;
            }

            if let Some(super_class) = &declaration.super_class {
                let target = resolve(&mut model, super_class, RelationType::SuperClass, &mut stats)?;
                model.add_relation(source, RelationType::SuperClass, target);
                stats.relations += 1;
            }
            for interface in &declaration.interfaces {
                let target = resolve(&mut model, interface, RelationType::SuperInterface, &mut stats)?;
                model.add_super_interface(source, target);
                stats.relations += 1;
            }
            for relation in &declaration.relations {
                let target = resolve(&mut model, &relation.target, relation.relation, &mut stats)?;
                match relation.relation {
                    RelationType::SuperInterface => model.add_super_interface(source, target),
                    other => model.add_relation(source, other, target),
                }
                stats.relations += 1;
            }
        }

        // Pass 3: Member Finalization
        model.finish_all_members()?;

        // Pass 4: Relation Finalization (declared classes only)
        for &class in &declared {
            model.relations_finished(class)?;
        }

        // Pass 5: Hierarchy Validation
        model.validate_hierarchy()?;

        tracing::debug!(
            declared = stats.declared,
            placeholders = stats.placeholders,
            members = stats.members,
            relations = stats.relations,
            "class model built"
        );
        Ok((model, stats))
    }
}

/// Looks up a relation target, creating an unprocessed placeholder for unknown ids.
fn resolve(
    model: &mut ClassModel,
    id: &str,
    relation: RelationType,
    stats: &mut BuildStats,
) -> Result<ClassId> {
    if let Some(handle) = model.class_id(id) {
        return Ok(handle);
    }
    tracing::warn!(target_class = %id, relation = %relation, "undeclared class, adding placeholder");
    stats.placeholders += 1;
    model.add_class(placeholder_element(id, relation), Vec::new())
}

fn placeholder_element(id: &str, relation: RelationType) -> ParameterizableElement {
    let (kind, modifiers) = match relation {
        RelationType::SuperInterface => (
            ElementKind::Interface,
            vec![ElementModifier::Interface, ElementModifier::Abstract],
        ),
        RelationType::DependencyThrows => (ElementKind::Throwable, vec![ElementModifier::Throwable]),
        RelationType::DependencyAnnotation => {
            (ElementKind::AnnotationType, vec![ElementModifier::Annotation])
        }
        _ => (ElementKind::Class, Vec::new()),
    };
    ParameterizableElement::new(
        LangElement::new(id, simple_name_of(id), kind, ElementVisibility::Public)
            .with_modifiers(modifiers),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ordering::KindVisibilityName;
    use crate::domain::class::Lifecycle;
    use crate::domain::edge::RelationDirection;
    use crate::domain::semantic::ClassDeclaration;

    fn builder() -> ModelBuilder {
        ModelBuilder::new(Arc::new(KindVisibilityName))
    }

    #[test]
    fn test_placeholders_stay_unprocessed() {
        let snapshot = TypeSystemSnapshot {
            classes: vec![
                ClassDeclaration::new("a.Reader", ElementKind::Class)
                    .with_super_class("java.lang.Object")
                    .with_interface("java.io.Closeable")
                    .with_relation(RelationType::DependencyThrows, "java.io.IOException"),
            ],
        };
        let (model, stats) = builder().build_with_stats(&snapshot).unwrap();
        assert_eq!(stats.declared, 1);
        assert_eq!(stats.placeholders, 3);
        assert_eq!(model.len(), 4);

        let reader = model.class(model.class_id("a.Reader").unwrap());
        assert!(reader.relations_processed());

        let closeable = model.class(model.class_id("java.io.Closeable").unwrap());
        assert_eq!(closeable.core().kind, ElementKind::Interface);
        assert!(closeable.is_interface());
        assert!(!closeable.relations_processed());
        assert_eq!(closeable.lifecycle(), Lifecycle::MembersFinalized);
        // a realizing class is listed among the subclasses
        assert_eq!(closeable.relations(RelationType::SuperClass, RelationDirection::Inbound).len(), 1);

        let io = model.class(model.class_id("java.io.IOException").unwrap());
        assert_eq!(io.core().kind, ElementKind::Throwable);
        assert_eq!(io.core().name, "IOException");
    }

    #[test]
    fn test_super_interface_in_relations_uses_asymmetric_adder() {
        let snapshot = TypeSystemSnapshot {
            classes: vec![
                ClassDeclaration::new("a.I", ElementKind::Interface),
                ClassDeclaration::new("a.J", ElementKind::Interface)
                    .with_relation(RelationType::SuperInterface, "a.I"),
            ],
        };
        let model = builder().build(&snapshot).unwrap();
        let i = model.class(model.class_id("a.I").unwrap());
        assert_eq!(i.relations(RelationType::SuperInterface, RelationDirection::Inbound).len(), 1);
        assert!(i.relations(RelationType::SuperClass, RelationDirection::Inbound).is_empty());
    }

    #[test]
    fn test_duplicate_declaration_is_an_error() {
        let snapshot = TypeSystemSnapshot {
            classes: vec![
                ClassDeclaration::new("a.A", ElementKind::Class),
                ClassDeclaration::new("a.A", ElementKind::Class),
            ],
        };
        let err = builder().build(&snapshot).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate class a.A"));
    }

    #[test]
    fn test_super_class_cycle_is_rejected() {
        let snapshot = TypeSystemSnapshot {
            classes: vec![
                ClassDeclaration::new("a.A", ElementKind::Class).with_super_class("a.B"),
                ClassDeclaration::new("a.B", ElementKind::Class).with_super_class("a.A"),
            ],
        };
        let err = builder().build(&snapshot).unwrap_err();
        assert!(err.to_string().contains("Super class cycle"));
    }

    #[test]
    fn test_members_get_default_ids_and_are_sorted() {
        let field = |name: &str| {
            ParameterizableElement::new(LangElement::new(
                "",
                name,
                ElementKind::Fields,
                ElementVisibility::Private,
            ))
        };
        let snapshot = TypeSystemSnapshot {
            classes: vec![
                ClassDeclaration::new("a.A", ElementKind::Class)
                    .with_member(field("y"))
                    .with_member(field("x")),
            ],
        };
        let model = builder().build(&snapshot).unwrap();
        let a = model.class(model.class_id("a.A").unwrap());
        let ids: Vec<_> = a.members(ElementKind::Fields).iter().map(|m| m.core.id.as_str()).collect();
        assert_eq!(ids, vec!["a.A.x", "a.A.y"]);
    }
}
