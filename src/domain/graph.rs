use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{Result, bail};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::domain::class::{ClassId, ClassNode, Lifecycle};
use crate::domain::edge::{RelationDirection, RelationType};
use crate::domain::element::{ParameterizableElement, TypeDescriptor};
use crate::domain::policy::ElementOrdering;

/// Class Model - the core data structure
///
/// An arena of [`ClassNode`]s connected by typed relations stored on both endpoints.
///
/// Construction protocol:
/// 1. `add_class` for every class, then `add_member` / `add_relation` /
///    `add_super_interface` in any order;
/// 2. `members_finished` exactly once per class;
/// 3. once every class finished its members, `relations_finished` exactly once per class.
pub struct ClassModel {
    classes: Vec<ClassNode>,

    /// Mapping from qualified name to class handle
    id_to_class: HashMap<String, ClassId>,

    ordering: Arc<dyn ElementOrdering>,

    /// Classes still in `Lifecycle::Building`
    pending_members: usize,
}

impl fmt::Debug for ClassModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassModel")
            .field("class_count", &self.classes.len())
            .field("pending_members", &self.pending_members)
            .field("ordering", &self.ordering.name())
            .finish()
    }
}

impl ClassModel {
    pub fn new(ordering: Arc<dyn ElementOrdering>) -> Self {
        Self {
            classes: Vec::new(),
            id_to_class: HashMap::new(),
            ordering,
            pending_members: 0,
        }
    }

    // ─── Nodes ──────────────────────────────────────────────────

    /// Registers a class in `Building` state. Class ids must be unique.
    pub fn add_class(
        &mut self,
        element: ParameterizableElement,
        type_parameters: Vec<TypeDescriptor>,
    ) -> Result<ClassId> {
        if self.id_to_class.contains_key(&element.core.id) {
            bail!("Class already registered: {}", element.core.id);
        }
        let handle = ClassId(self.classes.len() as u32);
        self.id_to_class.insert(element.core.id.clone(), handle);
        self.classes
            .push(ClassNode::new(handle, element, type_parameters));
        self.pending_members += 1;
        Ok(handle)
    }

    pub fn class_id(&self, id: &str) -> Option<ClassId> {
        self.id_to_class.get(id).copied()
    }

    /// Panics if `handle` does not come from this model.
    pub fn class(&self, handle: ClassId) -> &ClassNode {
        &self.classes[handle.index()]
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn ordering(&self) -> &dyn ElementOrdering {
        self.ordering.as_ref()
    }

    pub fn ordering_handle(&self) -> Arc<dyn ElementOrdering> {
        Arc::clone(&self.ordering)
    }

    /// Compares two classes with the model's ordering policy.
    pub fn compare_classes(&self, a: ClassId, b: ClassId) -> Ordering {
        self.ordering
            .compare(self.class(a).core(), self.class(b).core())
    }

    // ─── Members ────────────────────────────────────────────────

    /// Appends a member to the list of its kind. No ordering or dedup happens here.
    pub fn add_member(&mut self, class: ClassId, member: ParameterizableElement) {
        self.classes[class.index()].push_member(member);
    }

    // ─── Relations ──────────────────────────────────────────────

    /// Records `source → target` on the source and the mirrored inbound edge on the target.
    /// Self relations are ignored.
    pub fn add_relation(&mut self, source: ClassId, relation: RelationType, target: ClassId) {
        if source == target {
            return;
        }
        self.record(source, RelationDirection::Outbound, relation, target);
        self.record(target, RelationDirection::Inbound, relation, source);
    }

    /// Records `source` as implementing or extending the interface `target`.
    ///
    /// The outbound side is always SUPER_INTERFACE. On the target, a sub-interface is listed
    /// under inbound SUPER_INTERFACE while a realizing class is listed under inbound
    /// SUPER_CLASS, next to ordinary subclasses.
    pub fn add_super_interface(&mut self, source: ClassId, target: ClassId) {
        if source == target {
            return;
        }
        let mirrored = if self.class(source).is_interface() {
            RelationType::SuperInterface
        } else {
            RelationType::SuperClass
        };
        self.record(source, RelationDirection::Outbound, RelationType::SuperInterface, target);
        self.record(target, RelationDirection::Inbound, mirrored, source);
    }

    fn record(
        &mut self,
        owner: ClassId,
        direction: RelationDirection,
        relation: RelationType,
        target: ClassId,
    ) {
        let recorded = self.classes[owner.index()].record(direction, relation, target);
        if !recorded {
            tracing::trace!(
                owner = %self.class(owner).core().id,
                target = %self.class(target).core().id,
                relation = %relation,
                ?direction,
                "relation suppressed"
            );
        }
    }

    // ─── Lifecycle ──────────────────────────────────────────────

    /// Sorts members, fills absent member kinds and freezes outbound super types and nestings.
    pub fn members_finished(&mut self, class: ClassId) -> Result<()> {
        let lifecycle = self.class(class).lifecycle();
        if lifecycle != Lifecycle::Building {
            bail!(
                "Members of {} finished twice (state: {:?})",
                self.class(class).core().id,
                lifecycle
            );
        }

        let frozen = RelationType::FROZEN_WITH_MEMBERS
            .map(|relation| (relation, self.sorted_relations(class, relation, RelationDirection::Outbound)));

        let ordering = self.ordering.as_ref();
        let node = &mut self.classes[class.index()];
        node.finalize_members(|a, b| ordering.compare(&a.core, &b.core));
        for (relation, ordered) in frozen {
            node.freeze(RelationDirection::Outbound, relation, ordered);
        }
        node.set_lifecycle(Lifecycle::MembersFinalized);
        self.pending_members -= 1;
        Ok(())
    }

    /// Marks the class as processed and freezes its outer class and every outbound relation.
    ///
    /// Inbound relations depend on the outbound additions of other classes, so this may only
    /// run once every class of the model finished its members.
    pub fn relations_finished(&mut self, class: ClassId) -> Result<()> {
        let node = self.class(class);
        match node.lifecycle() {
            Lifecycle::MembersFinalized => {}
            Lifecycle::Building => {
                bail!("Relations of {} finished before its members", node.core().id)
            }
            Lifecycle::RelationsFinalized => {
                bail!("Relations of {} finished twice", node.core().id)
            }
        }
        if self.pending_members > 0 {
            bail!(
                "Relations of {} finished while {} classes are still building members",
                node.core().id,
                self.pending_members
            );
        }

        let mut frozen: Vec<(RelationDirection, RelationType, Vec<ClassId>)> = RelationType::ALL
            .into_iter()
            .filter(|&relation| !node.is_relation_frozen(relation, RelationDirection::Outbound))
            .map(|relation| {
                (
                    RelationDirection::Outbound,
                    relation,
                    self.sorted_relations(class, relation, RelationDirection::Outbound),
                )
            })
            .collect();
        frozen.push((
            RelationDirection::Inbound,
            RelationType::InnerClass,
            self.sorted_relations(class, RelationType::InnerClass, RelationDirection::Inbound),
        ));

        let node = &mut self.classes[class.index()];
        for (direction, relation, ordered) in frozen {
            node.freeze(direction, relation, ordered);
        }
        node.set_lifecycle(Lifecycle::RelationsFinalized);
        Ok(())
    }

    /// Finishes the members of every class still building. Returns how many were finished.
    pub fn finish_all_members(&mut self) -> Result<usize> {
        self.finish_all(Lifecycle::Building, Self::members_finished)
    }

    /// Whole-graph barrier: finishes the relations of every class whose members are done.
    pub fn finish_all_relations(&mut self) -> Result<usize> {
        self.finish_all(Lifecycle::MembersFinalized, Self::relations_finished)
    }

    fn finish_all(
        &mut self,
        from: Lifecycle,
        transition: fn(&mut Self, ClassId) -> Result<()>,
    ) -> Result<usize> {
        let pending: Vec<ClassId> = self
            .classes
            .iter()
            .filter(|c| c.lifecycle() == from)
            .map(ClassNode::handle)
            .collect();
        for &class in &pending {
            transition(self, class)?;
        }
        Ok(pending.len())
    }

    fn sorted_relations(
        &self,
        class: ClassId,
        relation: RelationType,
        direction: RelationDirection,
    ) -> Vec<ClassId> {
        let mut ordered = self.class(class).relations(relation, direction).to_vec();
        ordered.sort_by(|&a, &b| self.compare_classes(a, b));
        ordered
    }

    // ─── Validation ─────────────────────────────────────────────

    /// Returns a class lying on a cycle of inbound SUPER_CLASS relations, if any.
    ///
    /// The hierarchy tree follows these relations depth-first and would not terminate on
    /// such a cycle.
    pub fn find_super_class_cycle(&self) -> Option<ClassId> {
        let mut graph: DiGraph<ClassId, ()> = DiGraph::with_capacity(self.classes.len(), 0);
        let indices: Vec<NodeIndex> = self
            .classes
            .iter()
            .map(|c| graph.add_node(c.handle()))
            .collect();
        for class in &self.classes {
            for sub in class.relations(RelationType::SuperClass, RelationDirection::Inbound) {
                graph.add_edge(indices[class.handle().index()], indices[sub.index()], ());
            }
        }
        petgraph::algo::toposort(&graph, None)
            .err()
            .map(|cycle| graph[cycle.node_id()])
    }

    pub fn validate_hierarchy(&self) -> Result<()> {
        if let Some(class) = self.find_super_class_cycle() {
            bail!(
                "Super class cycle through {}",
                self.class(class).core().id
            );
        }
        Ok(())
    }
}
