use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::style::Rgb;

/// Side of a relation, seen from the class holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationDirection {
    Outbound,
    Inbound,
}

impl RelationDirection {
    pub const ALL: [RelationDirection; 2] = [RelationDirection::Outbound, RelationDirection::Inbound];

    pub fn index(self) -> usize {
        match self {
            RelationDirection::Outbound => 0,
            RelationDirection::Inbound => 1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            RelationDirection::Outbound => RelationDirection::Inbound,
            RelationDirection::Inbound => RelationDirection::Outbound,
        }
    }
}

/// Relation kind between two classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    // ============ Type Hierarchy ============
    SuperClass,
    SuperInterface,

    // ============ Nesting ============
    InnerClass,

    // ============ Usage ============
    Association,
    Dependency,
    DependencyThrows,
    DependencyAnnotation,
}

impl RelationType {
    pub const COUNT: usize = 7;

    pub const ALL: [RelationType; RelationType::COUNT] = [
        RelationType::SuperClass,
        RelationType::SuperInterface,
        RelationType::InnerClass,
        RelationType::Association,
        RelationType::Dependency,
        RelationType::DependencyThrows,
        RelationType::DependencyAnnotation,
    ];

    /// Outbound collections compacted together with the members.
    pub const FROZEN_WITH_MEMBERS: [RelationType; 3] = [
        RelationType::SuperClass,
        RelationType::SuperInterface,
        RelationType::InnerClass,
    ];

    pub fn index(self) -> usize {
        match self {
            RelationType::SuperClass => 0,
            RelationType::SuperInterface => 1,
            RelationType::InnerClass => 2,
            RelationType::Association => 3,
            RelationType::Dependency => 4,
            RelationType::DependencyThrows => 5,
            RelationType::DependencyAnnotation => 6,
        }
    }

    /// Checkable relations share one dedup ledger per direction: at most one of them
    /// survives per (class, direction, target).
    pub fn is_checkable(self) -> bool {
        matches!(
            self,
            RelationType::InnerClass | RelationType::Association | RelationType::Dependency
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::SuperClass => "SUPER_CLASS",
            RelationType::SuperInterface => "SUPER_INTERFACE",
            RelationType::InnerClass => "INNER_CLASS",
            RelationType::Association => "ASSOCIATION",
            RelationType::Dependency => "DEPENDENCY",
            RelationType::DependencyThrows => "DEPENDENCY_THROWS",
            RelationType::DependencyAnnotation => "DEPENDENCY_ANNOTATION",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            RelationType::SuperInterface | RelationType::Dependency => Rgb(0xA9A9A9),
            RelationType::DependencyThrows => Rgb(0xA90000),
            RelationType::DependencyAnnotation => Rgb(0x808000),
            RelationType::SuperClass | RelationType::InnerClass | RelationType::Association => {
                Rgb::BLACK
            }
        }
    }

    pub fn symbol(self, direction: RelationDirection) -> &'static str {
        match (self, direction) {
            (RelationType::SuperClass | RelationType::SuperInterface, RelationDirection::Outbound) => {
                "\u{2191}"
            }
            (RelationType::SuperClass | RelationType::SuperInterface, RelationDirection::Inbound) => {
                "\u{2193}"
            }
            (RelationType::InnerClass, RelationDirection::Outbound) => "\u{2295}",
            (RelationType::InnerClass, RelationDirection::Inbound) => "\u{2297}",
            (_, RelationDirection::Outbound) => "\u{2192}",
            (_, RelationDirection::Inbound) => "\u{2190}",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
