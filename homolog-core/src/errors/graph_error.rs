//! Pattern graph errors.

use super::error_code::{self, HomologErrorCode};

/// Errors raised by pattern graph construction.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Entity id must not be empty")]
    EmptyEntityId,

    #[error("Relation `{relation}` references unknown entity `{entity}`")]
    UnknownEntity { relation: String, entity: String },
}

impl HomologErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_ERROR
    }
}
