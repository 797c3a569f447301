//! Random-walk sampling and tag-overlap walk comparison.

use petgraph::graph::NodeIndex;
use rand::Rng;
use smallvec::SmallVec;

use crate::graph::Pattern;

/// Tag-set Jaccard a position pair must exceed to count as a match.
const POSITION_MATCH_THRESHOLD: f64 = 0.5;

/// Sample `num_walks` undirected random walks of up to `walk_length` steps
/// from `start`.
///
/// Each step picks uniformly among incident edges (either direction,
/// parallel edges weighted individually) and moves to the other endpoint;
/// a walk ends early on a vertex with no incident edges. Position 0 is the
/// start vertex itself.
pub(crate) fn sample_walks(
    pattern: &Pattern,
    start: NodeIndex,
    num_walks: usize,
    walk_length: usize,
    rng: &mut impl Rng,
) -> Vec<Vec<NodeIndex>> {
    (0..num_walks)
        .map(|_| {
            let mut walk = Vec::with_capacity(walk_length + 1);
            walk.push(start);
            let mut current = start;
            for _ in 0..walk_length {
                let incident: SmallVec<[NodeIndex; 8]> =
                    pattern.undirected_neighbors(current).collect();
                if incident.is_empty() {
                    break;
                }
                current = incident[rng.gen_range(0..incident.len())];
                walk.push(current);
            }
            walk
        })
        .collect()
}

/// Positionwise agreement of two walks, over the shorter length.
///
/// A position matches when both vertices are tagged and their tag-set
/// Jaccard exceeds 0.5.
pub(crate) fn walk_similarity(
    walk_a: &[NodeIndex],
    walk_b: &[NodeIndex],
    pattern_a: &Pattern,
    pattern_b: &Pattern,
) -> f64 {
    let length = walk_a.len().min(walk_b.len());
    if length == 0 {
        return 0.0;
    }

    let mut matches = 0usize;
    for position in 0..length {
        let tags_a = pattern_a.entity(walk_a[position]).tags();
        let tags_b = pattern_b.entity(walk_b[position]).tags();
        if tags_a.is_empty() || tags_b.is_empty() {
            continue;
        }
        let intersection = tags_a.intersection(tags_b).count();
        let union = tags_a.union(tags_b).count();
        if union > 0 && intersection as f64 / union as f64 > POSITION_MATCH_THRESHOLD {
            matches += 1;
        }
    }

    matches as f64 / length as f64
}

/// Mean pairwise similarity between two walk collections.
pub(crate) fn walk_set_similarity(
    walks_a: &[Vec<NodeIndex>],
    walks_b: &[Vec<NodeIndex>],
    pattern_a: &Pattern,
    pattern_b: &Pattern,
) -> f64 {
    if walks_a.is_empty() || walks_b.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;
    for walk_a in walks_a {
        for walk_b in walks_b {
            total += walk_similarity(walk_a, walk_b, pattern_a, pattern_b);
        }
    }
    total / (walks_a.len() * walks_b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Entity, Relation};

    fn tagged_chain(tags: &[&str]) -> Pattern {
        let mut pattern = Pattern::new();
        for id in ["a", "b", "c"] {
            pattern
                .add_entity(Entity::with_tags(id, id, tags.iter().copied()))
                .unwrap();
        }
        pattern
            .add_relation("a", Relation::new("r1", "links"), "b")
            .unwrap();
        pattern
            .add_relation("b", Relation::new("r2", "links"), "c")
            .unwrap();
        pattern
    }

    #[test]
    fn walks_start_at_the_origin() {
        let pattern = tagged_chain(&["t"]);
        let start = pattern.node("a").unwrap();
        let mut rng = rand::thread_rng();
        let walks = sample_walks(&pattern, start, 5, 3, &mut rng);
        assert_eq!(walks.len(), 5);
        for walk in &walks {
            assert_eq!(walk[0], start);
            assert!(walk.len() <= 4);
        }
    }

    #[test]
    fn isolated_vertex_walks_stop_immediately() {
        let mut pattern = Pattern::new();
        pattern
            .add_entity(Entity::with_tags("lone", "lone", ["t"]))
            .unwrap();
        let start = pattern.node("lone").unwrap();
        let mut rng = rand::thread_rng();
        let walks = sample_walks(&pattern, start, 3, 5, &mut rng);
        for walk in &walks {
            assert_eq!(walk.len(), 1);
        }
    }

    #[test]
    fn same_tags_match_every_position() {
        let pattern_a = tagged_chain(&["shared"]);
        let pattern_b = tagged_chain(&["shared"]);
        let walk_a = vec![pattern_a.node("a").unwrap(), pattern_a.node("b").unwrap()];
        let walk_b = vec![pattern_b.node("c").unwrap(), pattern_b.node("a").unwrap()];
        let similarity = walk_similarity(&walk_a, &walk_b, &pattern_a, &pattern_b);
        assert_eq!(similarity, 1.0);
    }

    #[test]
    fn untagged_positions_never_match() {
        let pattern_a = tagged_chain(&[]);
        let pattern_b = tagged_chain(&["t"]);
        let walk_a = vec![pattern_a.node("a").unwrap()];
        let walk_b = vec![pattern_b.node("a").unwrap()];
        assert_eq!(
            walk_similarity(&walk_a, &walk_b, &pattern_a, &pattern_b),
            0.0
        );
    }

    #[test]
    fn half_jaccard_does_not_match() {
        // Tag sets {x, y} vs {x, z}: Jaccard = 1/3, below the 0.5 bar.
        let pattern_a = tagged_chain(&["x", "y"]);
        let pattern_b = tagged_chain(&["x", "z"]);
        let walk_a = vec![pattern_a.node("a").unwrap()];
        let walk_b = vec![pattern_b.node("a").unwrap()];
        assert_eq!(
            walk_similarity(&walk_a, &walk_b, &pattern_a, &pattern_b),
            0.0
        );
    }
}
