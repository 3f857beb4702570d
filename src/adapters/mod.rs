pub mod json;
pub mod ordering;
