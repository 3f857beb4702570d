use std::cmp::Ordering;

use crate::domain::element::LangElement;
use crate::domain::policy::ElementOrdering;

/// Default ordering policy
/// Groups by kind, then visibility (public first), then name. The id breaks remaining ties
/// so overloads keep a stable order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KindVisibilityName;

impl ElementOrdering for KindVisibilityName {
    fn compare(&self, a: &LangElement, b: &LangElement) -> Ordering {
        a.kind
            .cmp(&b.kind)
            .then_with(|| a.visibility.cmp(&b.visibility))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    }

    fn name(&self) -> &str {
        "kind"
    }
}
