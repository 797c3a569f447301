//! Four-stage candidate filter cascade.
//!
//! Stage order is fixed: L0 ontological, L1 signature re-check, L2 graphlet
//! profile, L3 quick structural. L1 queries the whole signature catalogue
//! directly, so its output does not depend on L0's survivors; L2 and L3
//! narrow monotonically from there.

pub mod profile;

use homolog_core::types::collections::FxHashSet;

use crate::graph::Pattern;
use crate::index::{PatternId, SignatureIndex};

pub use profile::GraphletProfile;

/// L0: minimum tag-set Jaccard for same-domain candidates.
pub const L0_ONTOLOGICAL_THRESHOLD: f64 = 0.85;
/// L1: signature similarity for the index re-check.
pub const L1_SIGNATURE_THRESHOLD: f64 = 0.70;
/// L2: minimum graphlet-profile similarity (inclusive).
pub const L2_GRAPHLET_THRESHOLD: f64 = 0.60;
/// L3: minimum quick structural similarity (inclusive).
pub const L3_STRUCTURAL_THRESHOLD: f64 = 0.50;

/// Fraction of the smaller tag set below which an overlap still counts as
/// cross-domain.
const CROSS_DOMAIN_OVERLAP: f64 = 0.3;

/// Jaccard similarity of two tag sets; 0 when either side is empty.
pub fn domain_similarity(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Whether two tag sets belong to unrelated domains: no overlap at all, or
/// an overlap smaller than 30% of the smaller set.
pub fn is_cross_domain(a: &FxHashSet<String>, b: &FxHashSet<String>) -> bool {
    let intersection = a.intersection(b).count();
    intersection == 0 || (intersection as f64) < CROSS_DOMAIN_OVERLAP * a.len().min(b.len()) as f64
}

/// The four-stage cascade narrowing a candidate set before verification.
#[derive(Debug, Default)]
pub struct CascadeFilter;

impl CascadeFilter {
    pub fn new() -> Self {
        Self
    }

    /// Run all four stages in order and return the survivors of L3.
    pub fn filter(
        &self,
        index: &SignatureIndex,
        query: &Pattern,
        candidates: Vec<PatternId>,
    ) -> Vec<PatternId> {
        let survivors = self.level0_ontological(index, query, candidates);
        tracing::debug!(survivors = survivors.len(), "L0 ontological prefilter");

        let survivors = self.level1_signature(index, query);
        tracing::debug!(survivors = survivors.len(), "L1 signature re-check");

        let survivors = self.level2_graphlet(index, query, survivors);
        tracing::debug!(survivors = survivors.len(), "L2 graphlet filter");

        let survivors = self.level3_structural(index, query, survivors);
        tracing::debug!(survivors = survivors.len(), "L3 quick structural filter");

        survivors
    }

    /// L0: keep candidates whose tag sets are near-identical to the query's
    /// or clearly cross-domain; prune the ambiguous middle ground.
    fn level0_ontological(
        &self,
        index: &SignatureIndex,
        query: &Pattern,
        candidates: Vec<PatternId>,
    ) -> Vec<PatternId> {
        let query_tags = query.domain_tags();
        candidates
            .into_iter()
            .filter(|&id| {
                let candidate_tags = index.pattern(id).domain_tags();
                domain_similarity(query_tags, candidate_tags) >= L0_ONTOLOGICAL_THRESHOLD
                    || is_cross_domain(query_tags, candidate_tags)
            })
            .collect()
    }

    /// L1: re-query the full signature catalogue at a tighter threshold.
    /// Independent of the prior stage by construction.
    fn level1_signature(&self, index: &SignatureIndex, query: &Pattern) -> Vec<PatternId> {
        index.find_candidates(query, L1_SIGNATURE_THRESHOLD)
    }

    /// L2: graphlet-profile similarity at 0.60, inclusive.
    fn level2_graphlet(
        &self,
        index: &SignatureIndex,
        query: &Pattern,
        candidates: Vec<PatternId>,
    ) -> Vec<PatternId> {
        let query_profile = GraphletProfile::of(query);
        candidates
            .into_iter()
            .filter(|&id| {
                let profile = GraphletProfile::of(index.pattern(id));
                query_profile.similarity(&profile) >= L2_GRAPHLET_THRESHOLD
            })
            .collect()
    }

    /// L3: the same profile similarity at an independent 0.50 threshold.
    fn level3_structural(
        &self,
        index: &SignatureIndex,
        query: &Pattern,
        candidates: Vec<PatternId>,
    ) -> Vec<PatternId> {
        let query_profile = GraphletProfile::of(query);
        candidates
            .into_iter()
            .filter(|&id| {
                let profile = GraphletProfile::of(index.pattern(id));
                query_profile.similarity(&profile) >= L3_STRUCTURAL_THRESHOLD
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Entity, Relation, TypeRegistry};
    use homolog_core::config::IndexConfig;

    fn tag_set(tags: &[&str]) -> FxHashSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn tagged_chain(prefix: &str, tags: &[&str], len: usize) -> Pattern {
        let mut pattern = Pattern::new();
        for i in 0..len {
            pattern
                .add_entity(Entity::with_tags(
                    format!("{prefix}{i}"),
                    format!("{prefix}{i}"),
                    tags.iter().copied(),
                ))
                .unwrap();
        }
        for i in 0..len.saturating_sub(1) {
            pattern
                .add_relation(
                    &format!("{prefix}{i}"),
                    Relation::new(format!("{prefix}r{i}"), "links"),
                    &format!("{prefix}{}", i + 1),
                )
                .unwrap();
        }
        pattern
    }

    #[test]
    fn domain_similarity_empty_side_is_zero() {
        assert_eq!(domain_similarity(&tag_set(&[]), &tag_set(&["a"])), 0.0);
        assert_eq!(domain_similarity(&tag_set(&[]), &tag_set(&[])), 0.0);
    }

    #[test]
    fn domain_similarity_counts_overlap() {
        let a = tag_set(&["x", "y", "z"]);
        let b = tag_set(&["x", "y", "w"]);
        assert!((domain_similarity(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn disjoint_sets_are_cross_domain() {
        assert!(is_cross_domain(&tag_set(&["a", "b"]), &tag_set(&["c", "d"])));
    }

    #[test]
    fn heavy_overlap_is_not_cross_domain() {
        let a = tag_set(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        let mut b = a.clone();
        b.remove("j");
        b.insert("k".to_string());
        // 9 of 10 shared — well above 30% of the smaller set.
        assert!(!is_cross_domain(&a, &b));
    }

    #[test]
    fn small_overlap_is_cross_domain() {
        let a = tag_set(&["a", "b", "c", "d"]);
        let b = tag_set(&["a", "x", "y", "z"]);
        // 1 of 4 shared = 25% of the smaller set, under the 30% bar.
        assert!(is_cross_domain(&a, &b));
    }

    #[test]
    fn cascade_shrinks_monotonically_after_l1() {
        let mut index = SignatureIndex::new(&IndexConfig::default(), TypeRegistry::new());
        for i in 0..6 {
            index.index_pattern(tagged_chain(&format!("p{i}"), &["corpus"], 3 + i));
        }
        let query = tagged_chain("q", &["query"], 3);

        let filter = CascadeFilter::new();
        let l1 = filter.level1_signature(&index, &query);
        let l2 = filter.level2_graphlet(&index, &query, l1.clone());
        let l3 = filter.level3_structural(&index, &query, l2.clone());
        assert!(l2.len() <= l1.len());
        assert!(l3.len() <= l2.len());
    }

    #[test]
    fn l1_ignores_prior_survivors() {
        let mut index = SignatureIndex::new(&IndexConfig::default(), TypeRegistry::new());
        index.index_pattern(tagged_chain("p", &["corpus"], 3));
        let query = tagged_chain("q", &["query"], 3);

        let filter = CascadeFilter::new();
        // Identical inputs aside: an empty prior survivor set must not
        // change what L1 returns.
        let from_empty = filter.level1_signature(&index, &query);
        let after_l0 = {
            let l0 = filter.level0_ontological(&index, &query, Vec::new());
            assert!(l0.is_empty());
            filter.level1_signature(&index, &query)
        };
        assert_eq!(from_empty, after_l0);
    }

    #[test]
    fn l2_threshold_is_inclusive() {
        // Profile pair built so the per-attribute scores are 1.0, 1.0, 0.4,
        // and 0.0, averaging to the L2 threshold itself.
        let a = GraphletProfile {
            vertex_count: 3,
            edge_count: 2,
            density: 0.0,
            avg_degree: 0.0,
        };
        let b = GraphletProfile {
            vertex_count: 3,
            edge_count: 2,
            density: 0.6,
            avg_degree: 1.0,
        };
        let similarity = a.similarity(&b);
        assert!((similarity - L2_GRAPHLET_THRESHOLD).abs() < 1e-9);
        assert!(
            similarity >= L2_GRAPHLET_THRESHOLD,
            "a candidate sitting exactly on the threshold is retained"
        );
    }

    #[test]
    fn l2_prunes_what_l3_would_keep() {
        // 4-chain vs 2-chain: profile similarity is 0.5625 — below the L2
        // bar but above the L3 bar.
        let query = tagged_chain("q", &[], 4);
        let candidate = tagged_chain("c", &[], 2);
        let similarity = GraphletProfile::of(&query).similarity(&GraphletProfile::of(&candidate));
        assert!((similarity - 0.5625).abs() < 1e-9);
        assert!(similarity < L2_GRAPHLET_THRESHOLD);
        assert!(similarity >= L3_STRUCTURAL_THRESHOLD);
    }
}
