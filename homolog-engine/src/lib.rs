//! Homolog engine: cross-domain structural analogy retrieval over typed
//! graph patterns.
//!
//! Given a small query pattern (entities linked by typed relations), the
//! engine finds corpus patterns that share the query's shape and plausible
//! semantics, even when the match belongs to an unrelated subject domain.
//!
//! Pipeline: signature-based approximate indexing → four-stage filter
//! cascade → hybrid verification (random walks escalating to exact
//! isomorphism) → cross-domain gate → ranked top-k.

pub mod engine;
pub mod filter;
pub mod graph;
pub mod index;
pub mod verify;

pub use engine::{Analogy, AnalogyEngine};
pub use filter::{CascadeFilter, GraphletProfile};
pub use graph::{Entity, Pattern, Relation, TypeRegistry};
pub use index::{PatternId, Signature, SignatureIndex};
pub use verify::HybridVerifier;
