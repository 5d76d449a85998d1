//! Encoder: raw bytes → self-contained artifact.

use crate::artifact;
use crate::bitio::BitWriter;
use crate::codebook::CodeBook;
use crate::error::{CodecError, Result};
use crate::freq::FreqTable;
use crate::tree::Node;

/// Compress `input` into a self-contained artifact.
///
/// Builds the frequency table, tree, and code book for this call only,
/// then serializes `[code table][padding byte][packed payload]`. The
/// tree and table are discarded afterwards; the artifact embeds
/// everything decoding needs.
///
/// Empty input fails before any tree construction.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let freq = FreqTable::from_bytes(input)?;
    let tree = Node::build(&freq);
    let book = CodeBook::from_tree(&tree)?;

    let mut out = Vec::new();
    artifact::write_table(&book, &mut out);

    let mut writer = BitWriter::new();
    for &b in input {
        // The book was derived from this same input, so it covers every
        // byte present; a miss means the book and input disagree.
        let code = book
            .get(b)
            .ok_or_else(|| CodecError::MalformedTable(format!("no code for byte {b:#04x}")))?;
        writer.write_code(code);
    }

    let (payload, padding) = writer.finish();
    out.push(padding);
    out.extend_from_slice(&payload);
    Ok(out)
}
