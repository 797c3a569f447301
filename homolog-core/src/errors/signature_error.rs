//! Signature comparison errors.

use super::error_code::{self, HomologErrorCode};

/// Errors raised when comparing signatures directly.
///
/// Inside an index scan a width mismatch degrades to similarity 0 instead,
/// so a batch query never aborts.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Signature widths differ: {left} vs {right}")]
    WidthMismatch { left: usize, right: usize },
}

impl HomologErrorCode for SignatureError {
    fn error_code(&self) -> &'static str {
        error_code::SIGNATURE_ERROR
    }
}
