//! Retrieval orchestration: index the corpus once, then run
//! retrieve → filter → verify → cross-domain gate → rank per query.

mod extraction;

use std::cmp::Ordering;
use std::fmt;

use homolog_core::config::RetrievalConfig;
use homolog_core::errors::RetrievalError;
use rayon::prelude::*;
use serde::Serialize;

use crate::filter::{is_cross_domain, CascadeFilter};
use crate::graph::Pattern;
use crate::index::{PatternId, SignatureIndex};
use crate::verify::HybridVerifier;

/// Signature-scan threshold for the initial candidate retrieval.
const CANDIDATE_THRESHOLD: f64 = 0.5;

/// One retrieved cross-domain analogy: a corpus pattern and its verified
/// similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Analogy {
    pub candidate: PatternId,
    pub similarity: f64,
}

impl fmt::Display for Analogy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Analogy {{ candidate = {:?}, similarity = {:.3} }}",
            self.candidate, self.similarity
        )
    }
}

/// The retrieval engine: a signature catalogue built once from a corpus
/// graph, a filter cascade, and a hybrid verifier.
///
/// The catalogue is immutable after construction, so concurrent read-only
/// queries are safe.
pub struct AnalogyEngine {
    index: SignatureIndex,
    filter: CascadeFilter,
    verifier: HybridVerifier,
}

impl AnalogyEngine {
    /// Build the engine from a fully constructed corpus graph.
    ///
    /// Greedily extracts neighborhood patterns from the corpus, indexes
    /// each, and freezes the catalogue. The index inherits the corpus
    /// pattern's tag registry.
    pub fn new(corpus: &Pattern, config: RetrievalConfig) -> Result<Self, RetrievalError> {
        config.validate()?;

        let radius = config.index.effective_radius();
        let mut index = SignatureIndex::new(&config.index, corpus.registry().clone());

        let patterns = extraction::extract_patterns(corpus, radius);
        tracing::info!(
            corpus_vertices = corpus.vertex_count(),
            corpus_edges = corpus.edge_count(),
            patterns = patterns.len(),
            "indexing corpus patterns"
        );
        for pattern in patterns {
            index.index_pattern(pattern);
        }

        Ok(Self {
            index,
            filter: CascadeFilter::new(),
            verifier: HybridVerifier::new(&config.verifier),
        })
    }

    /// Build with compiled defaults (width 128, radius 2, threshold 0.7).
    pub fn with_defaults(corpus: &Pattern) -> Result<Self, RetrievalError> {
        Self::new(corpus, RetrievalConfig::default())
    }

    pub fn index(&self) -> &SignatureIndex {
        &self.index
    }

    /// Resolve a result's candidate id to its corpus pattern.
    pub fn candidate(&self, id: PatternId) -> &Pattern {
        self.index.pattern(id)
    }

    /// Retrieve the top-k cross-domain analogies for a query pattern,
    /// ordered by descending similarity.
    ///
    /// An empty result list is a valid outcome, not an error.
    pub fn find_analogies(&self, query: &Pattern, top_k: usize) -> Vec<Analogy> {
        let candidates = self.index.find_candidates(query, CANDIDATE_THRESHOLD);
        tracing::debug!(candidates = candidates.len(), "signature scan");

        let filtered = self.filter.filter(&self.index, query, candidates);
        tracing::debug!(survivors = filtered.len(), "filter cascade");

        let query_tags = query.domain_tags();
        let mut results: Vec<Analogy> = filtered
            .par_iter()
            .filter_map(|&id| {
                let candidate = self.index.pattern(id);
                let similarity = self.verifier.verify(query, candidate);
                is_cross_domain(query_tags, candidate.domain_tags()).then_some(Analogy {
                    candidate: id,
                    similarity,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(top_k);

        tracing::debug!(results = results.len(), top_k, "ranked analogies");
        results
    }
}
