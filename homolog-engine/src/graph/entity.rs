//! Entities: the typed, labelled vertices of a pattern graph.

use std::hash::{Hash, Hasher};

use homolog_core::types::collections::FxHashSet;
use serde::{Deserialize, Serialize};

/// A vertex in a pattern graph.
///
/// Identity is the id: two entities with the same id are the same vertex
/// regardless of label, tags, or attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    id: String,
    label: String,
    tags: FxHashSet<String>,
    attributes: FxHashSet<String>,
}

impl Entity {
    /// Create an untagged entity.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            tags: FxHashSet::default(),
            attributes: FxHashSet::default(),
        }
    }

    /// Create an entity with an initial tag set.
    pub fn with_tags<I, S>(id: impl Into<String>, label: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entity = Self::new(id, label);
        entity.tags = tags.into_iter().map(Into::into).collect();
        entity
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tags(&self) -> &FxHashSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    /// Free-form attributes; carried as inert metadata.
    pub fn attributes(&self) -> &FxHashSet<String> {
        &self.attributes
    }

    pub fn add_attribute(&mut self, attribute: impl Into<String>) {
        self.attributes.insert(attribute.into());
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
