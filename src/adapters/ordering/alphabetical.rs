use std::cmp::Ordering;

use crate::domain::element::LangElement;
use crate::domain::policy::ElementOrdering;

/// Plain name ordering, ignoring kind and visibility
#[derive(Debug, Clone, Copy, Default)]
pub struct Alphabetical;

impl ElementOrdering for Alphabetical {
    fn compare(&self, a: &LangElement, b: &LangElement) -> Ordering {
        a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
    }

    fn name(&self) -> &str {
        "name"
    }
}
