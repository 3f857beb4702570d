pub mod element;
pub mod edge;
pub mod style;
pub mod class;
pub mod graph;
pub mod policy;
pub mod builder;
pub mod hierarchy;
pub mod members_tree;
pub mod uml;
pub mod semantic;
pub mod ports;
