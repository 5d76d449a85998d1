//! Decoder: artifact → original bytes.
//!
//! The embedded table is inverted into a flat binary trie. Walking bits
//! down the trie and emitting at each leaf is the greedy
//! match-and-reset procedure, which is unambiguous exactly because the
//! codes are prefix-free; the trie build rejects any table where they
//! are not.

use crate::artifact;
use crate::bitio::BitReader;
use crate::codebook::Code;
use crate::error::{CodecError, Result};

const ROOT: usize = 0;

#[derive(Default, Clone)]
struct TrieNode {
    child: [Option<usize>; 2],
    sym: Option<u8>,
}

/// Reverse lookup: bit path → symbol, over one typed `u8` symbol domain.
struct DecodeTree {
    nodes: Vec<TrieNode>,
}

impl DecodeTree {
    /// Insert every table entry, rejecting prefix violations.
    ///
    /// A code that passes through an existing leaf, or terminates on a
    /// node that already has children or a symbol, makes the table
    /// ambiguous — that is a corruption error, not something to skip.
    fn from_entries(entries: &[(u8, Code)]) -> Result<Self> {
        let mut nodes = vec![TrieNode::default()];
        for (sym, code) in entries {
            let mut cur = ROOT;
            for i in 0..code.len as usize {
                if nodes[cur].sym.is_some() {
                    return Err(CodecError::MalformedTable(format!(
                        "code for symbol {sym:#04x} extends another symbol's code"
                    )));
                }
                let dir = code.bit(i) as usize;
                cur = match nodes[cur].child[dir] {
                    Some(next) => next,
                    None => {
                        nodes.push(TrieNode::default());
                        let next = nodes.len() - 1;
                        nodes[cur].child[dir] = Some(next);
                        next
                    }
                };
            }
            let end = &mut nodes[cur];
            if end.sym.is_some() || end.child.iter().any(Option::is_some) {
                return Err(CodecError::MalformedTable(format!(
                    "code for symbol {sym:#04x} is a prefix of another code"
                )));
            }
            end.sym = Some(*sym);
        }
        Ok(Self { nodes })
    }
}

/// Decompress an artifact produced by [`compress`](crate::compress).
///
/// For any artifact the encoder produced from input `x`, this returns
/// exactly `x`. Structural damage — missing padding byte, missing
/// payload, a bit path with no code, or leftover bits beyond the
/// declared padding that don't complete a code — aborts with a typed
/// error rather than returning partial output.
pub fn decompress(artifact_bytes: &[u8]) -> Result<Vec<u8>> {
    let (entries, table_end) = artifact::read_table(artifact_bytes)?;
    let tree = DecodeTree::from_entries(&entries)?;

    let padding = *artifact_bytes
        .get(table_end)
        .ok_or(CodecError::Truncated("padding byte"))?;
    if padding > 7 {
        return Err(CodecError::MalformedTable(format!(
            "padding count {padding} outside 0..=7"
        )));
    }
    let payload = &artifact_bytes[table_end + 1..];
    if payload.is_empty() {
        return Err(CodecError::Truncated("payload"));
    }
    let valid_bits = payload.len() * 8 - padding as usize;

    let mut out = Vec::new();
    let mut reader = BitReader::new(payload, valid_bits);
    let mut cur = ROOT;
    let mut pending = 0usize;
    while let Some(bit) = reader.next_bit() {
        cur = match tree.nodes[cur].child[bit as usize] {
            Some(next) => next,
            None => {
                return Err(CodecError::UndecodableBits {
                    bit: reader.position() - 1,
                })
            }
        };
        pending += 1;
        if let Some(sym) = tree.nodes[cur].sym {
            out.push(sym);
            cur = ROOT;
            pending = 0;
        }
    }
    if pending > 0 {
        return Err(CodecError::TrailingBits { leftover: pending });
    }
    Ok(out)
}
