//! class-structure library: structural model of an object-oriented type system and the
//! hierarchy, members and UML projections built from it.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod server;
