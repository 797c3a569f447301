//! Foundation crate for Homolog: error enums, configuration, hashed
//! collections, and tracing setup shared by the retrieval engine.

pub mod config;
pub mod errors;
pub mod telemetry;
pub mod types;
