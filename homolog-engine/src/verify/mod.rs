//! Hybrid verification: probabilistic random-walk matching with escalation
//! to exact backtracking isomorphism.

mod isomorphism;
mod walks;

use homolog_core::config::VerifierConfig;

use crate::graph::Pattern;

/// Damping applied to the probabilistic score when the exact check fails
/// after escalation.
const NON_ISOMORPHIC_PENALTY: f64 = 0.7;

/// Escalating verifier: cheap probabilistic scoring first, exact
/// isomorphism only for pairs that already look similar.
pub struct HybridVerifier {
    similarity_threshold: f64,
    num_walks: usize,
    walk_length: usize,
    step_budget: u64,
}

impl HybridVerifier {
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            similarity_threshold: config.effective_similarity_threshold(),
            num_walks: config.effective_num_walks(),
            walk_length: config.effective_walk_length(),
            step_budget: config.effective_step_budget(),
        }
    }

    /// Average tag-overlap agreement of random walks over every
    /// (query vertex, candidate vertex) pair.
    ///
    /// Returns 0 when either pattern is empty — degenerate input is data,
    /// not an error.
    pub fn probabilistic_match(
        &self,
        query: &Pattern,
        candidate: &Pattern,
        num_walks: usize,
        walk_length: usize,
    ) -> f64 {
        if query.is_empty() || candidate.is_empty() {
            return 0.0;
        }

        let mut rng = rand::thread_rng();
        let mut total = 0.0;
        let mut comparisons = 0usize;

        for query_vertex in query.vertex_indices() {
            let query_walks = walks::sample_walks(query, query_vertex, num_walks, walk_length, &mut rng);
            for candidate_vertex in candidate.vertex_indices() {
                let candidate_walks =
                    walks::sample_walks(candidate, candidate_vertex, num_walks, walk_length, &mut rng);
                total += walks::walk_set_similarity(&query_walks, &candidate_walks, query, candidate);
                comparisons += 1;
            }
        }

        if comparisons > 0 {
            total / comparisons as f64
        } else {
            0.0
        }
    }

    /// Exact isomorphism with pruning.
    ///
    /// Mismatched vertex or edge counts return false without searching;
    /// otherwise the budgeted backtracking search runs to completion.
    pub fn exact_match_with_pruning(&self, query: &Pattern, candidate: &Pattern) -> bool {
        if query.vertex_count() != candidate.vertex_count() {
            return false;
        }
        if query.edge_count() != candidate.edge_count() {
            return false;
        }
        isomorphism::find_isomorphism(query, candidate, self.step_budget)
    }

    /// Combined verification.
    ///
    /// Scores the pair probabilistically; below the threshold the score is
    /// returned unescalated. Above it, an exact hit scores 1.0 and a miss
    /// is damped to 0.7 × the probabilistic score.
    pub fn verify(&self, query: &Pattern, candidate: &Pattern) -> f64 {
        let probabilistic =
            self.probabilistic_match(query, candidate, self.num_walks, self.walk_length);

        if probabilistic < self.similarity_threshold {
            return probabilistic;
        }

        if self.exact_match_with_pruning(query, candidate) {
            1.0
        } else {
            NON_ISOMORPHIC_PENALTY * probabilistic
        }
    }
}
