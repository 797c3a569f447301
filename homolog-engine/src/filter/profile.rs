//! Graphlet profiles: coarse structural summaries for quick comparison.

use serde::{Deserialize, Serialize};

use crate::graph::Pattern;

/// Coarse numeric summary of one pattern's shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphletProfile {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub avg_degree: f64,
}

impl GraphletProfile {
    /// Compute the profile of a pattern.
    ///
    /// Density is e/(v·(v−1)), defined as 0 for v ≤ 1.
    pub fn of(pattern: &Pattern) -> Self {
        let vertex_count = pattern.vertex_count();
        let edge_count = pattern.edge_count();

        let density = if vertex_count > 1 {
            edge_count as f64 / (vertex_count as f64 * (vertex_count as f64 - 1.0))
        } else {
            0.0
        };

        let avg_degree = if vertex_count > 0 {
            let total: usize = pattern
                .vertex_indices()
                .map(|vertex| pattern.degree(vertex))
                .sum();
            total as f64 / vertex_count as f64
        } else {
            0.0
        };

        Self {
            vertex_count,
            edge_count,
            density,
            avg_degree,
        }
    }

    /// Mean of four per-attribute agreement scores, each in [0, 1].
    ///
    /// Counts and average degree use `1 − |a−b| / max(a, b, 1)`; density,
    /// already normalized, uses `1 − |a−b|` directly.
    pub fn similarity(&self, other: &Self) -> f64 {
        let vertex_sim = count_similarity(self.vertex_count, other.vertex_count);
        let edge_sim = count_similarity(self.edge_count, other.edge_count);
        let density_sim = 1.0 - (self.density - other.density).abs();
        let degree_sim = 1.0
            - (self.avg_degree - other.avg_degree).abs()
                / self.avg_degree.max(other.avg_degree).max(1.0);

        (vertex_sim + edge_sim + density_sim + degree_sim) / 4.0
    }
}

fn count_similarity(a: usize, b: usize) -> f64 {
    let scale = a.max(b).max(1) as f64;
    1.0 - (a as f64 - b as f64).abs() / scale
}
