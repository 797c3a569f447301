//! Signature index configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the signature index.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndexConfig {
    /// Signature width (hash slots per signature). Default: 128.
    pub signature_width: Option<usize>,
    /// Neighborhood radius for structural features and pattern extraction.
    /// Default: 2.
    pub radius: Option<usize>,
    /// Blend weight for structural features. Default: 0.4.
    pub structural_weight: Option<f64>,
    /// Blend weight for semantic features. Default: 0.4.
    pub semantic_weight: Option<f64>,
    /// Blend weight for whole-pattern context features. Default: 0.2.
    pub context_weight: Option<f64>,
}

impl IndexConfig {
    /// Returns the effective signature width, defaulting to 128.
    pub fn effective_signature_width(&self) -> usize {
        self.signature_width.unwrap_or(128)
    }

    /// Returns the effective neighborhood radius, defaulting to 2.
    pub fn effective_radius(&self) -> usize {
        self.radius.unwrap_or(2)
    }

    /// Returns the effective structural blend weight, defaulting to 0.4.
    pub fn effective_structural_weight(&self) -> f64 {
        self.structural_weight.unwrap_or(0.4)
    }

    /// Returns the effective semantic blend weight, defaulting to 0.4.
    pub fn effective_semantic_weight(&self) -> f64 {
        self.semantic_weight.unwrap_or(0.4)
    }

    /// Returns the effective context blend weight, defaulting to 0.2.
    pub fn effective_context_weight(&self) -> f64 {
        self.context_weight.unwrap_or(0.2)
    }
}
