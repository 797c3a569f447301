//! Exact graph isomorphism search: iterative backtracking with pruning and
//! an explicit trial budget.

use homolog_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::graph::NodeIndex;

use crate::graph::Pattern;

/// Search for a vertex bijection mapping every query edge onto a candidate
/// edge.
///
/// Query vertices are assigned in insertion order. A candidate vertex is
/// tried only if it is unused, tag-compatible, of equal total degree, and
/// consistent with every already-mapped neighbor. The search runs on an
/// explicit work stack — no recursion — and counts every candidate trial;
/// exceeding `step_budget` terminates the search as a non-match.
///
/// Callers must have already checked that vertex counts match.
pub(crate) fn find_isomorphism(query: &Pattern, candidate: &Pattern, step_budget: u64) -> bool {
    let query_order: Vec<NodeIndex> = query.vertex_indices().collect();
    let candidate_vertices: Vec<NodeIndex> = candidate.vertex_indices().collect();
    let depth_of: FxHashMap<NodeIndex, usize> = query_order
        .iter()
        .enumerate()
        .map(|(depth, &vertex)| (vertex, depth))
        .collect();
    let total = query_order.len();

    // assignment[d] = position into candidate_vertices chosen at depth d.
    let mut assignment: Vec<usize> = Vec::with_capacity(total);
    let mut used = vec![false; candidate_vertices.len()];
    // cursor[d] = next candidate position to try at depth d.
    let mut cursors: Vec<usize> = vec![0];
    let mut steps: u64 = 0;

    loop {
        let depth = assignment.len();

        if depth == total {
            if mapping_preserves_edges(query, candidate, &depth_of, &assignment, &candidate_vertices)
            {
                return true;
            }
            // Full mapping failed the edge check; backtrack.
            cursors.pop();
            match assignment.pop() {
                Some(position) => used[position] = false,
                None => return false,
            }
            continue;
        }

        let query_vertex = query_order[depth];
        let cursor = cursors[depth];
        let mut chosen = None;

        for position in cursor..candidate_vertices.len() {
            steps += 1;
            if steps > step_budget {
                tracing::warn!(step_budget, "isomorphism search budget exhausted");
                return false;
            }
            if used[position] {
                continue;
            }
            let candidate_vertex = candidate_vertices[position];
            if !tags_compatible(query, candidate, query_vertex, candidate_vertex) {
                continue;
            }
            if query.degree(query_vertex) != candidate.degree(candidate_vertex) {
                continue;
            }
            if !neighbors_consistent(
                query,
                candidate,
                query_vertex,
                candidate_vertex,
                &depth_of,
                &assignment,
                &candidate_vertices,
            ) {
                continue;
            }
            chosen = Some(position);
            break;
        }

        match chosen {
            Some(position) => {
                cursors[depth] = position + 1;
                assignment.push(position);
                used[position] = true;
                cursors.push(0);
            }
            None => {
                cursors.pop();
                match assignment.pop() {
                    Some(position) => used[position] = false,
                    None => return false,
                }
            }
        }
    }
}

/// Tag compatibility: the sets intersect, or either side is untagged.
fn tags_compatible(
    query: &Pattern,
    candidate: &Pattern,
    query_vertex: NodeIndex,
    candidate_vertex: NodeIndex,
) -> bool {
    let query_tags = query.entity(query_vertex).tags();
    let candidate_tags = candidate.entity(candidate_vertex).tags();
    if query_tags.is_empty() || candidate_tags.is_empty() {
        return true;
    }
    query_tags.intersection(candidate_tags).next().is_some()
}

/// Every already-mapped neighbor of the query vertex must map onto a
/// neighbor of the candidate vertex (undirected adjacency).
fn neighbors_consistent(
    query: &Pattern,
    candidate: &Pattern,
    query_vertex: NodeIndex,
    candidate_vertex: NodeIndex,
    depth_of: &FxHashMap<NodeIndex, usize>,
    assignment: &[usize],
    candidate_vertices: &[NodeIndex],
) -> bool {
    let candidate_neighbors: FxHashSet<NodeIndex> =
        candidate.undirected_neighbors(candidate_vertex).collect();

    for query_neighbor in query.undirected_neighbors(query_vertex) {
        let Some(&neighbor_depth) = depth_of.get(&query_neighbor) else {
            continue;
        };
        if neighbor_depth >= assignment.len() {
            continue; // Not mapped yet.
        }
        let mapped = candidate_vertices[assignment[neighbor_depth]];
        if !candidate_neighbors.contains(&mapped) {
            return false;
        }
    }
    true
}

/// Confirm a complete mapping: every directed query edge must exist between
/// the mapped candidate endpoints.
fn mapping_preserves_edges(
    query: &Pattern,
    candidate: &Pattern,
    depth_of: &FxHashMap<NodeIndex, usize>,
    assignment: &[usize],
    candidate_vertices: &[NodeIndex],
) -> bool {
    for (source, _, target) in query.edges() {
        let mapped_source = candidate_vertices[assignment[depth_of[&source]]];
        let mapped_target = candidate_vertices[assignment[depth_of[&target]]];
        if !candidate.has_edge(mapped_source, mapped_target) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Entity, Relation};

    fn chain(ids: &[&str], tags: &[&str]) -> Pattern {
        let mut pattern = Pattern::new();
        for id in ids {
            pattern
                .add_entity(Entity::with_tags(*id, *id, tags.iter().copied()))
                .unwrap();
        }
        for pair in ids.windows(2) {
            pattern
                .add_relation(
                    pair[0],
                    Relation::new(format!("{}->{}", pair[0], pair[1]), "links"),
                    pair[1],
                )
                .unwrap();
        }
        pattern
    }

    #[test]
    fn matching_chains_are_isomorphic() {
        let query = chain(&["a", "b", "c"], &["t"]);
        let candidate = chain(&["x", "y", "z"], &["t"]);
        assert!(find_isomorphism(&query, &candidate, 1_000));
    }

    #[test]
    fn reversed_chain_still_matches() {
        // A directed 3-chain is isomorphic to itself read backwards only
        // via the reversed assignment; the directed edge check still finds
        // the consistent orientation.
        let query = chain(&["a", "b", "c"], &["t"]);
        let mut candidate = Pattern::new();
        for id in ["x", "y", "z"] {
            candidate
                .add_entity(Entity::with_tags(id, id, ["t"]))
                .unwrap();
        }
        candidate
            .add_relation("z", Relation::new("r1", "links"), "y")
            .unwrap();
        candidate
            .add_relation("y", Relation::new("r2", "links"), "x")
            .unwrap();
        assert!(find_isomorphism(&query, &candidate, 1_000));
    }

    #[test]
    fn chain_does_not_match_fork() {
        // Same counts, different shape: a → b → c vs a → b, a → c.
        let query = chain(&["a", "b", "c"], &["t"]);
        let mut candidate = Pattern::new();
        for id in ["x", "y", "z"] {
            candidate
                .add_entity(Entity::with_tags(id, id, ["t"]))
                .unwrap();
        }
        candidate
            .add_relation("x", Relation::new("r1", "links"), "y")
            .unwrap();
        candidate
            .add_relation("x", Relation::new("r2", "links"), "z")
            .unwrap();
        assert!(!find_isomorphism(&query, &candidate, 1_000));
    }

    #[test]
    fn disjoint_tags_block_the_mapping() {
        let query = chain(&["a", "b"], &["alpha"]);
        let candidate = chain(&["x", "y"], &["beta"]);
        assert!(!find_isomorphism(&query, &candidate, 1_000));
    }

    #[test]
    fn untagged_vertices_are_compatible_with_anything() {
        let query = chain(&["a", "b"], &[]);
        let candidate = chain(&["x", "y"], &["beta"]);
        assert!(find_isomorphism(&query, &candidate, 1_000));
    }

    #[test]
    fn empty_patterns_are_trivially_isomorphic() {
        assert!(find_isomorphism(&Pattern::new(), &Pattern::new(), 10));
    }

    #[test]
    fn exhausted_budget_reports_no_match() {
        let query = chain(&["a", "b", "c", "d"], &["t"]);
        let candidate = chain(&["w", "x", "y", "z"], &["t"]);
        assert!(find_isomorphism(&query, &candidate, 100_000));
        assert!(!find_isomorphism(&query, &candidate, 1));
    }
}
