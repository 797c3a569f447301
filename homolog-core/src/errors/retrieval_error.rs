//! Aggregated retrieval errors.

use super::error_code::HomologErrorCode;
use super::{ConfigError, GraphError, SignatureError};

/// Errors that can surface from engine construction or retrieval.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Signature error: {0}")]
    Signature(#[from] SignatureError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl HomologErrorCode for RetrievalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Signature(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
