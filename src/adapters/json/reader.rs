use crate::domain::ports::SnapshotSource;
use crate::domain::semantic::TypeSystemSnapshot;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// JSON file snapshot source
pub struct JsonSnapshotSource {
    path: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonSnapshotSource {
    fn load(&self) -> Result<TypeSystemSnapshot> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot file: {}", self.path.display()))?;
        parse_snapshot(&content)
            .with_context(|| format!("Failed to parse snapshot file: {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parses a snapshot from JSON text.
pub fn parse_snapshot(content: &str) -> Result<TypeSystemSnapshot> {
    Ok(serde_json::from_str(content)?)
}
