//! Greedy neighborhood pattern extraction from a corpus graph.

use homolog_core::types::collections::FxHashSet;

use crate::graph::Pattern;

/// Patterns spanning fewer vertices than this are discarded.
pub(crate) const MIN_PATTERN_VERTICES: usize = 2;

/// Extract r-hop neighborhood patterns around every not-yet-covered corpus
/// vertex, in insertion order.
///
/// A kept pattern marks all of its vertices as covered, so later seeds skip
/// them; a discarded pattern (under [`MIN_PATTERN_VERTICES`]) leaves its
/// vertices available for later neighborhoods.
pub(crate) fn extract_patterns(corpus: &Pattern, radius: usize) -> Vec<Pattern> {
    let mut covered: FxHashSet<_> = FxHashSet::default();
    let mut patterns = Vec::new();

    for seed in corpus.vertex_indices() {
        if covered.contains(&seed) {
            continue;
        }

        let mut vertices = corpus.k_hop_neighbors(seed, radius);
        vertices.insert(seed);

        let pattern = corpus.induced_subgraph(&vertices);
        if pattern.vertex_count() >= MIN_PATTERN_VERTICES {
            covered.extend(vertices);
            patterns.push(pattern);
        }
    }

    patterns
}
