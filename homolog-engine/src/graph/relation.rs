//! Relations: the typed, weighted edges of a pattern graph.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A typed edge payload with an informativeness weight in [0, 1].
///
/// Identity is the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    id: String,
    label: String,
    domain: String,
    weight: f64,
}

impl Relation {
    /// General-domain relation with full weight.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_weight(id, label, "general", 1.0)
    }

    /// Relation with an explicit domain and weight. The weight is clamped
    /// to [0, 1].
    pub fn with_weight(
        id: impl Into<String>,
        label: impl Into<String>,
        domain: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            domain: domain.into(),
            weight: weight.clamp(0.0, 1.0),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Relation {}

impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
