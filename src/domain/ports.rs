use crate::domain::semantic::TypeSystemSnapshot;
use anyhow::Result;

/// Snapshot source port (implemented by Infrastructure)
pub trait SnapshotSource {
    fn load(&self) -> Result<TypeSystemSnapshot>;

    /// Human readable origin, used in logs and health reports.
    fn describe(&self) -> String;
}
