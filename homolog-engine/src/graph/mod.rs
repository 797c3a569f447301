//! Pattern graph data model: entities, typed relations, directed weighted
//! multigraphs, and per-pattern tag registries.

pub mod entity;
pub mod pattern;
pub mod registry;
pub mod relation;

pub use entity::Entity;
pub use pattern::Pattern;
pub use registry::TypeRegistry;
pub use relation::Relation;
