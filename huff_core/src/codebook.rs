//! Code table derivation: one depth-first walk of the tree.

use crate::error::{CodecError, Result};
use crate::tree::Node;

/// A single prefix code: `len` bits packed MSB-first into `bits`.
///
/// `len` is always ≥ 1 — an empty code cannot be emitted into a
/// bitstream, so even a lone symbol gets one bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub len: u8,
    pub bits: Vec<u8>,
}

impl Code {
    /// Bit `i` of the code, counting from the first (most significant).
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        (self.bits[i / 8] >> (7 - (i % 8))) & 1 == 1
    }

    /// Render as a 0/1 string, mostly for inspection output.
    pub fn to_bit_string(&self) -> String {
        (0..self.len as usize)
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }
}

/// Symbol → code mapping derived from one tree.
///
/// The table is caller-owned and filled by a single walk — there is no
/// shared accumulator between calls. By construction the codes are the
/// root-to-leaf paths of a binary tree, hence prefix-free, and every
/// symbol present in the source input has exactly one entry.
pub struct CodeBook {
    codes: [Option<Code>; 256],
    entries: usize,
}

impl CodeBook {
    /// Derive the code book for `root`: 0 on the left edge, 1 on the
    /// right, recording the accumulated path at each leaf.
    ///
    /// A root that is itself a leaf (single distinct symbol) would get
    /// an empty path from the naive walk, which is unencodable; it is
    /// assigned the 1-bit code `0` instead.
    pub fn from_tree(root: &Node) -> Result<CodeBook> {
        let mut codes: [Option<Code>; 256] = std::array::from_fn(|_| None);
        let mut entries = 0usize;

        match root {
            Node::Leaf { sym, .. } => {
                codes[*sym as usize] = Some(Code {
                    len: 1,
                    bits: vec![0x00],
                });
                entries = 1;
            }
            Node::Internal { .. } => {
                let mut path = Vec::with_capacity(32);
                walk(root, &mut path, &mut codes, &mut entries)?;
            }
        }

        Ok(CodeBook { codes, entries })
    }

    /// The code for `sym`, if it occurred in the source input.
    #[inline]
    pub fn get(&self, sym: u8) -> Option<&Code> {
        self.codes[sym as usize].as_ref()
    }

    /// Number of symbols with a code. Always 1..=256.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// All `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (i as u8, c)))
    }
}

fn walk(
    node: &Node,
    path: &mut Vec<bool>,
    codes: &mut [Option<Code>; 256],
    entries: &mut usize,
) -> Result<()> {
    match node {
        Node::Leaf { sym, .. } => {
            if path.len() > u8::MAX as usize {
                return Err(CodecError::CodeTooLong { len: path.len() });
            }
            codes[*sym as usize] = Some(pack(path));
            *entries += 1;
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            walk(left, path, codes, entries)?;
            path.pop();
            path.push(true);
            walk(right, path, codes, entries)?;
            path.pop();
        }
    }
    Ok(())
}

fn pack(path: &[bool]) -> Code {
    let mut bits = vec![0u8; path.len().div_ceil(8)];
    for (i, &b) in path.iter().enumerate() {
        if b {
            bits[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    Code {
        len: path.len() as u8,
        bits,
    }
}
