//! Byte-frequency model: one O(n) counting pass over the input.

use crate::error::{CodecError, Result};

/// Histogram of byte occurrences for one input buffer.
///
/// The symbol universe is exactly the set of distinct byte values
/// present — no fixed-alphabet assumption. Built once per compress call
/// and immutable afterwards.
#[derive(Debug, Clone)]
pub struct FreqTable {
    counts: [u64; 256],
    distinct: usize,
}

impl FreqTable {
    /// Count every byte in `input`.
    ///
    /// Empty input is an error, signalled here before any tree
    /// construction happens.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        if input.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        let mut counts = [0u64; 256];
        for &b in input {
            counts[b as usize] += 1;
        }
        let distinct = counts.iter().filter(|&&c| c > 0).count();
        Ok(Self { counts, distinct })
    }

    /// Occurrence count for `sym` (zero if absent).
    #[inline]
    pub fn count(&self, sym: u8) -> u64 {
        self.counts[sym as usize]
    }

    /// Number of distinct byte values present. Always ≥ 1.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    /// Symbols present in the input, in ascending byte order, with their
    /// counts. The ascending order is what seeds the deterministic heap
    /// tie-break in the tree builder.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }
}
