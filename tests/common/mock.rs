//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use anyhow::{Result, anyhow};
use class_structure::domain::element::LangElement;
use class_structure::domain::policy::ElementOrdering;
use class_structure::domain::ports::SnapshotSource;
use class_structure::domain::semantic::TypeSystemSnapshot;

/// In-memory snapshot source.
pub struct MockSnapshotSource {
    snapshot: Option<TypeSystemSnapshot>,
}

impl MockSnapshotSource {
    pub fn new(snapshot: TypeSystemSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    /// A source whose load always fails.
    pub fn failing() -> Self {
        Self { snapshot: None }
    }
}

impl SnapshotSource for MockSnapshotSource {
    fn load(&self) -> Result<TypeSystemSnapshot> {
        self.snapshot
            .clone()
            .ok_or_else(|| anyhow!("mock snapshot unavailable"))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

/// Orders by descending name and counts comparisons.
#[derive(Default)]
pub struct ReverseNameOrdering {
    pub comparisons: AtomicUsize,
}

impl ReverseNameOrdering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comparison_count(&self) -> usize {
        self.comparisons.load(AtomicOrdering::Relaxed)
    }
}

impl ElementOrdering for ReverseNameOrdering {
    fn compare(&self, a: &LangElement, b: &LangElement) -> Ordering {
        self.comparisons.fetch_add(1, AtomicOrdering::Relaxed);
        b.name.cmp(&a.name)
    }

    fn name(&self) -> &str {
        "reverse"
    }
}
