mod alphabetical;
mod kind_first;

use std::sync::Arc;

use anyhow::{Result, anyhow};

use crate::domain::policy::ElementOrdering;

pub use alphabetical::Alphabetical;
pub use kind_first::KindVisibilityName;

/// Resolves an ordering policy by its short name (`kind` or `name`).
pub fn ordering_by_name(name: &str) -> Result<Arc<dyn ElementOrdering>> {
    match name {
        "kind" => Ok(Arc::new(KindVisibilityName)),
        "name" => Ok(Arc::new(Alphabetical)),
        other => Err(anyhow!("Unknown ordering: {} (expected kind or name)", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_by_name() {
        assert_eq!(ordering_by_name("kind").unwrap().name(), "kind");
        assert_eq!(ordering_by_name("name").unwrap().name(), "name");
        assert!(ordering_by_name("size").is_err());
    }
}
