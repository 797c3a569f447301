//! Feature extraction and deterministic hashing for signature slots.
//!
//! Three feature collections per pattern: structural (per-vertex shape),
//! semantic (per-vertex tags against the index registry), and context
//! (whole-pattern counts and density). Feature keys are sorted and
//! deduplicated before folding so repeated computation is deterministic.

use xxhash_rust::xxh3::xxh3_64;

use crate::graph::{Pattern, TypeRegistry};

/// Modulus for all slot arithmetic. A 31-bit prime, so folded values fit a
/// `u32` and intermediate products fit a `u64`.
pub(crate) const SIGNATURE_PRIME: u64 = 2_147_483_647;

/// Per-collection fold multipliers.
const STRUCTURAL_MULTIPLIER: u64 = 31;
const SEMANTIC_MULTIPLIER: u64 = 37;
const CONTEXT_MULTIPLIER: u64 = 41;

/// Hashed feature collections for one pattern, ready for slot folding.
pub(crate) struct FeatureSet {
    structural: Vec<u64>,
    semantic: Vec<u64>,
    context: Vec<u64>,
}

impl FeatureSet {
    /// Extract all three feature collections.
    ///
    /// `registry` is the index-level tag registry, which marks whether each
    /// tag was observed in the corpus.
    pub(crate) fn extract(pattern: &Pattern, radius: usize, registry: &TypeRegistry) -> Self {
        let mut structural_keys: Vec<String> = pattern
            .vertex_indices()
            .map(|vertex| {
                let entity = pattern.entity(vertex);
                let neighborhood = pattern.k_hop_neighbors(vertex, radius).len();
                format!(
                    "{}|{}|{}|{}",
                    entity.id(),
                    pattern.degree(vertex),
                    neighborhood,
                    radius
                )
            })
            .collect();

        let mut semantic_keys: Vec<String> = pattern
            .entities()
            .flat_map(|entity| {
                entity
                    .tags()
                    .iter()
                    .map(move |tag| format!("{}|{}|{}", entity.id(), tag, registry.contains(tag)))
            })
            .collect();

        let vertices = pattern.vertex_count();
        let edges = pattern.edge_count();
        let density = if vertices > 1 {
            edges as f64 / (vertices as f64 * (vertices as f64 - 1.0))
        } else {
            0.0
        };
        let mut context_keys = vec![format!("{}|{}|{}", vertices, edges, density.to_bits())];

        Self {
            structural: hash_keys(&mut structural_keys),
            semantic: hash_keys(&mut semantic_keys),
            context: hash_keys(&mut context_keys),
        }
    }

    /// Fold all three collections for one signature slot and blend them.
    pub(crate) fn slot_hash(&self, slot: usize, alpha: f64, beta: f64, gamma: f64) -> u32 {
        let structural = fold(&self.structural, STRUCTURAL_MULTIPLIER, slot);
        let semantic = fold(&self.semantic, SEMANTIC_MULTIPLIER, slot);
        let context = fold(&self.context, CONTEXT_MULTIPLIER, slot);

        let blended =
            (alpha * structural as f64 + beta * semantic as f64 + gamma * context as f64).round();
        (blended as u64 % SIGNATURE_PRIME) as u32
    }
}

/// Sort, deduplicate (set semantics), and hash feature keys.
fn hash_keys(keys: &mut Vec<String>) -> Vec<u64> {
    keys.sort_unstable();
    keys.dedup();
    keys.iter()
        .map(|key| xxh3_64(key.as_bytes()) % SIGNATURE_PRIME)
        .collect()
}

/// Polynomial accumulator over one feature collection, salted by slot index:
/// `h = (h·m + f·(slot+1)) mod P`.
fn fold(features: &[u64], multiplier: u64, slot: usize) -> u64 {
    let salt = slot as u64 + 1;
    let mut hash = 0u64;
    for &feature in features {
        hash = (hash * multiplier + feature * salt) % SIGNATURE_PRIME;
    }
    hash
}
