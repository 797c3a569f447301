//! Hybrid verifier configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the hybrid verifier.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VerifierConfig {
    /// Probabilistic score required before escalating to the exact check.
    /// Default: 0.7.
    pub similarity_threshold: Option<f64>,
    /// Random walks sampled per vertex. Default: 10.
    pub num_walks: Option<usize>,
    /// Steps per random walk. Default: 3.
    pub walk_length: Option<usize>,
    /// Trial budget for the exact isomorphism search; exhausting it ends the
    /// search as a non-match. Default: 1,000,000.
    pub step_budget: Option<u64>,
}

impl VerifierConfig {
    /// Returns the effective escalation threshold, defaulting to 0.7.
    pub fn effective_similarity_threshold(&self) -> f64 {
        self.similarity_threshold.unwrap_or(0.7)
    }

    /// Returns the effective walk count, defaulting to 10.
    pub fn effective_num_walks(&self) -> usize {
        self.num_walks.unwrap_or(10)
    }

    /// Returns the effective walk length, defaulting to 3.
    pub fn effective_walk_length(&self) -> usize {
        self.walk_length.unwrap_or(3)
    }

    /// Returns the effective search budget, defaulting to 1,000,000 trials.
    pub fn effective_step_budget(&self) -> u64 {
        self.step_budget.unwrap_or(1_000_000)
    }
}
