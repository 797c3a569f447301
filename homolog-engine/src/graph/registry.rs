//! Per-pattern tag registry.

use homolog_core::types::collections::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// The set of tags observed in one pattern, with an optional subtype
/// taxonomy.
///
/// Owned by exactly one [`Pattern`](super::Pattern); subgraph extraction
/// derives a fresh registry from the extracted vertices rather than sharing
/// the parent's. The subtype map is recorded metadata only — no filter or
/// verifier consults it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeRegistry {
    tags: FxHashSet<String>,
    subtypes: FxHashMap<String, FxHashSet<String>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed tag.
    pub fn register(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// All observed tags.
    pub fn tags(&self) -> &FxHashSet<String> {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Record a parent → child subtype edge; both tags become observed.
    pub fn add_subtype(&mut self, parent: impl Into<String>, child: impl Into<String>) {
        let parent = parent.into();
        let child = child.into();
        self.tags.insert(parent.clone());
        self.tags.insert(child.clone());
        self.subtypes.entry(parent).or_default().insert(child);
    }

    pub fn is_subtype(&self, child: &str, parent: &str) -> bool {
        self.subtypes
            .get(parent)
            .is_some_and(|children| children.contains(child))
    }
}
