//! Hashed collection aliases used across the workspace.
//!
//! FxHash is a fast non-cryptographic hasher well suited to the short
//! string keys (entity ids, tags) that dominate this codebase.

pub use rustc_hash::{FxHashMap, FxHashSet};
