//! Stable string error codes for logging and host bindings.

pub const GRAPH_ERROR: &str = "HOMOLOG_GRAPH_ERROR";
pub const SIGNATURE_ERROR: &str = "HOMOLOG_SIGNATURE_ERROR";
pub const CONFIG_ERROR: &str = "HOMOLOG_CONFIG_ERROR";

/// Exposes a stable error code for each subsystem error.
pub trait HomologErrorCode {
    fn error_code(&self) -> &'static str;
}
