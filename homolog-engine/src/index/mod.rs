//! Signature catalogue: approximate candidate retrieval by Hamming
//! agreement over semantic-aware hash signatures.

mod features;
pub mod signature;

use homolog_core::config::IndexConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::graph::{Pattern, TypeRegistry};
use features::FeatureSet;

pub use signature::Signature;

/// Opaque arena handle for an indexed corpus pattern.
///
/// Identity-based, not content-based: indexing two structurally identical
/// patterns yields two distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternId(u32);

impl PatternId {
    fn as_usize(self) -> usize {
        self.0 as usize
    }
}

struct IndexEntry {
    pattern: Pattern,
    signature: Signature,
}

/// Signature catalogue over corpus patterns.
///
/// Populated once at construction time and read-only afterwards, so
/// concurrent queries are safe. Candidate retrieval is a linear scan of all
/// stored signatures — O(corpus size) per query, acceptable for moderate
/// corpora only.
pub struct SignatureIndex {
    width: usize,
    radius: usize,
    structural_weight: f64,
    semantic_weight: f64,
    context_weight: f64,
    registry: TypeRegistry,
    entries: Vec<IndexEntry>,
}

impl SignatureIndex {
    /// Create an empty index.
    ///
    /// `registry` is the corpus-level tag registry; signature semantic
    /// features record membership against it.
    pub fn new(config: &IndexConfig, registry: TypeRegistry) -> Self {
        Self {
            width: config.effective_signature_width(),
            radius: config.effective_radius(),
            structural_weight: config.effective_structural_weight(),
            semantic_weight: config.effective_semantic_weight(),
            context_weight: config.effective_context_weight(),
            registry,
            entries: Vec::new(),
        }
    }

    /// Signature width in hash slots.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Compute the signature of a pattern.
    ///
    /// Deterministic: repeated calls on an unmutated pattern produce
    /// identical signatures.
    pub fn compute_signature(&self, pattern: &Pattern) -> Signature {
        let features = FeatureSet::extract(pattern, self.radius, &self.registry);
        let slots = (0..self.width)
            .map(|slot| {
                features.slot_hash(
                    slot,
                    self.structural_weight,
                    self.semantic_weight,
                    self.context_weight,
                )
            })
            .collect();
        Signature::from_slots(slots)
    }

    /// Compute and store the signature of a corpus pattern, taking
    /// ownership of the pattern.
    pub fn index_pattern(&mut self, pattern: Pattern) -> PatternId {
        let signature = self.compute_signature(&pattern);
        let id = PatternId(self.entries.len() as u32);
        self.entries.push(IndexEntry { pattern, signature });
        id
    }

    pub fn pattern(&self, id: PatternId) -> &Pattern {
        &self.entries[id.as_usize()].pattern
    }

    pub fn signature(&self, id: PatternId) -> &Signature {
        &self.entries[id.as_usize()].signature
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All indexed pattern ids, in indexing order.
    pub fn ids(&self) -> impl Iterator<Item = PatternId> + '_ {
        (0..self.entries.len()).map(|i| PatternId(i as u32))
    }

    /// Every indexed pattern whose signature similarity to the query is at
    /// least `threshold`, in indexing order.
    ///
    /// The query signature is computed once; the scan itself fans out over
    /// the read-only catalogue. A width mismatch degrades to similarity 0
    /// rather than aborting the scan.
    pub fn find_candidates(&self, query: &Pattern, threshold: f64) -> Vec<PatternId> {
        let query_signature = self.compute_signature(query);
        self.entries
            .par_iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                let similarity = query_signature
                    .similarity(&entry.signature)
                    .unwrap_or(0.0);
                (similarity >= threshold).then_some(PatternId(position as u32))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Entity, Relation};

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

    fn small_index() -> SignatureIndex {
        SignatureIndex::new(&IndexConfig::default(), TypeRegistry::new())
    }

    #[test]
    fn signature_has_configured_width() {
        let index = small_index();
        let sig = index.compute_signature(&tagged_chain("a", &["x"], 3));
        assert_eq!(sig.width(), 128);
    }

    #[test]
    fn signature_is_deterministic() {
        let index = small_index();
        let pattern = tagged_chain("a", &["x"], 4);
        assert_eq!(
            index.compute_signature(&pattern),
            index.compute_signature(&pattern)
        );
    }

    #[test]
    fn identical_patterns_get_independent_entries() {
        let mut index = small_index();
        let first = index.index_pattern(tagged_chain("a", &["x"], 3));
        let second = index.index_pattern(tagged_chain("a", &["x"], 3));
        assert_ne!(first, second);
        assert_eq!(index.len(), 2);
        assert_eq!(index.signature(first), index.signature(second));
    }

    #[test]
    fn find_candidates_threshold_is_inclusive() {
        let mut index = small_index();
        let id = index.index_pattern(tagged_chain("a", &["x"], 3));
        // An identical query scores exactly 1.0.
        let hits = index.find_candidates(&tagged_chain("a", &["x"], 3), 1.0);
        assert_eq!(hits, vec![id]);
    }

    #[test]
    fn find_candidates_excludes_dissimilar_patterns() {
        let mut index = small_index();
        index.index_pattern(tagged_chain("corpus", &["x", "y"], 6));
        let query = tagged_chain("q", &["z"], 2);
        let hits = index.find_candidates(&query, 0.99);
        assert!(hits.is_empty());
    }

    #[test]
    fn empty_pattern_signature_is_stable() {
        let index = small_index();
        let empty = Pattern::new();
        assert_eq!(
            index.compute_signature(&empty),
            index.compute_signature(&empty)
        );
    }
}
