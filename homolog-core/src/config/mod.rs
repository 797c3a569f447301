//! Configuration system for Homolog.
//! TOML-based, layered resolution: env > project file > defaults.

pub mod index_config;
pub mod retrieval_config;
pub mod verifier_config;

pub use index_config::IndexConfig;
pub use retrieval_config::RetrievalConfig;
pub use verifier_config::VerifierConfig;
