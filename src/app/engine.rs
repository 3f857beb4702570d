use crate::adapters::json::JsonSnapshotSource;
use crate::app::dto::*;
use crate::domain::builder::ModelBuilder;
use crate::domain::class::ClassId;
use crate::domain::graph::ClassModel;
use crate::domain::hierarchy::{build_forest, build_hierarchy};
use crate::domain::members_tree::build_members_tree;
use crate::domain::policy::ElementOrdering;
use crate::domain::ports::SnapshotSource;
use crate::domain::uml::{build_relation_summary, build_uml_table};
use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Lookup of a class id that is not part of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNotFound(pub String);

impl fmt::Display for ClassNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class not found: {}", self.0)
    }
}

impl std::error::Error for ClassNotFound {}

#[derive(Clone)]
pub struct ModelEngine {
    inner: Arc<RwLock<EngineData>>,
}

struct EngineData {
    snapshot_path: PathBuf,
    ordering: Arc<dyn ElementOrdering>,
    model: Arc<ClassModel>,
}

impl ModelEngine {
    /// Construct an engine from an already-built model.
    ///
    /// Used for testing or when the model is filled by an in-process extractor.
    /// `reload` re-reads `snapshot_path` with the model's ordering.
    pub fn from_model(snapshot_path: PathBuf, model: ClassModel) -> Self {
        Self {
            inner: Arc::new(RwLock::new(EngineData {
                snapshot_path,
                ordering: model.ordering_handle(),
                model: Arc::new(model),
            })),
        }
    }

    pub fn load_from_json(json_path: &Path, ordering: Arc<dyn ElementOrdering>) -> Result<Self> {
        let model = load_model(json_path, Arc::clone(&ordering))?;
        Ok(Self {
            inner: Arc::new(RwLock::new(EngineData {
                snapshot_path: json_path.to_path_buf(),
                ordering,
                model: Arc::new(model),
            })),
        })
    }

    pub fn reload(&self) -> Result<HealthResponse> {
        let (path, ordering) = {
            let data = self.inner.read().unwrap();
            (data.snapshot_path.clone(), Arc::clone(&data.ordering))
        };
        let model = load_model(&path, ordering)?;

        let mut data = self.inner.write().unwrap();
        data.model = Arc::new(model);
        Ok(health_of(&data))
    }

    pub fn health(&self) -> HealthResponse {
        let data = self.inner.read().unwrap();
        health_of(&data)
    }

    /// Current model; stays valid across reloads.
    pub fn model(&self) -> Arc<ClassModel> {
        Arc::clone(&self.inner.read().unwrap().model)
    }

    pub fn classes(&self) -> ClassesResponse {
        let model = self.model();
        let mut handles: Vec<ClassId> = model.classes().map(|c| c.handle()).collect();
        handles.sort_by(|&a, &b| model.compare_classes(a, b));
        let items: Vec<ClassRef> = handles
            .into_iter()
            .map(|h| ClassRef::from(model.class(h)))
            .collect();
        ClassesResponse {
            total: items.len(),
            items,
        }
    }

    /// Hierarchy below `root`, or the whole forest when no root is given.
    pub fn hierarchy(&self, root: Option<&str>) -> Result<HierarchyResponse> {
        let model = self.model();
        let roots = match root {
            Some(id) => vec![HierarchyNodeDto::from(&build_hierarchy(
                &model,
                lookup(&model, id)?,
            ))],
            None => build_forest(&model)
                .iter()
                .map(HierarchyNodeDto::from)
                .collect(),
        };
        Ok(HierarchyResponse { roots })
    }

    pub fn members(&self, class: &str) -> Result<TreeNodeDto> {
        let model = self.model();
        let handle = lookup(&model, class)?;
        Ok(TreeNodeDto::from(&build_members_tree(&model, handle)))
    }

    pub fn uml(&self, class: &str) -> Result<UmlTableResponse> {
        let model = self.model();
        let handle = lookup(&model, class)?;
        Ok(UmlTableResponse::from(&build_uml_table(&model, handle)))
    }

    pub fn summary(&self, class: &str) -> Result<SummaryResponse> {
        let model = self.model();
        let handle = lookup(&model, class)?;
        Ok(SummaryResponse::new(
            model.class(handle),
            build_relation_summary(&model, handle),
        ))
    }
}

/// Reads a snapshot file and replays it into a finalized model.
pub fn load_model(json_path: &Path, ordering: Arc<dyn ElementOrdering>) -> Result<ClassModel> {
    let source = JsonSnapshotSource::new(json_path);
    let snapshot = source.load()?;
    let model = ModelBuilder::new(ordering)
        .build(&snapshot)
        .with_context(|| format!("Failed to build class model from {}", source.describe()))?;
    tracing::info!(
        path = %json_path.display(),
        classes = model.len(),
        "snapshot loaded"
    );
    Ok(model)
}

fn lookup(model: &ClassModel, id: &str) -> Result<ClassId> {
    model
        .class_id(id)
        .ok_or_else(|| ClassNotFound(id.to_string()).into())
}

fn health_of(data: &EngineData) -> HealthResponse {
    let processed_count = data
        .model
        .classes()
        .filter(|c| c.relations_processed())
        .count();
    HealthResponse {
        snapshot_path: data.snapshot_path.to_string_lossy().to_string(),
        ordering: data.ordering.name().to_string(),
        class_count: data.model.len(),
        processed_count,
        placeholder_count: data.model.len() - processed_count,
    }
}
