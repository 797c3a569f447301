//! Fixed-width hash signatures compared by Hamming agreement.

use homolog_core::errors::SignatureError;
use serde::{Deserialize, Serialize};

/// A fixed-width vector of hash slots summarizing one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    slots: Vec<u32>,
}

impl Signature {
    pub(crate) fn from_slots(slots: Vec<u32>) -> Self {
        Self { slots }
    }

    /// Number of hash slots.
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> u32 {
        self.slots[index]
    }

    /// Number of disagreeing slots. Widths must match.
    pub fn hamming_distance(&self, other: &Self) -> Result<usize, SignatureError> {
        if self.slots.len() != other.slots.len() {
            return Err(SignatureError::WidthMismatch {
                left: self.slots.len(),
                right: other.slots.len(),
            });
        }
        Ok(self
            .slots
            .iter()
            .zip(other.slots.iter())
            .filter(|(a, b)| a != b)
            .count())
    }

    /// 1 − normalized Hamming distance, in [0, 1]. Widths must match.
    pub fn similarity(&self, other: &Self) -> Result<f64, SignatureError> {
        let distance = self.hamming_distance(other)?;
        if self.slots.is_empty() {
            return Ok(1.0);
        }
        Ok(1.0 - distance as f64 / self.slots.len() as f64)
    }
}
