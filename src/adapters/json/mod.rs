mod reader;

pub use reader::{JsonSnapshotSource, parse_snapshot};
