use std::cmp::Ordering;

use crate::domain::element::LangElement;

/// Ordering policy applied when members and relation collections are frozen.
///
/// Injected into [`crate::domain::graph::ClassModel`]; implementations live in
/// `adapters::ordering`. The same policy orders members of a class and the classes of a
/// compacted relation collection (compared through their element attributes).
pub trait ElementOrdering: Send + Sync {
    fn compare(&self, a: &LangElement, b: &LangElement) -> Ordering;

    /// Short identifier, e.g. for health reports.
    fn name(&self) -> &str;
}
