//! Byte-exact artifact layout.
//!
//! ```text
//! [2 bytes]   u16 LE — code table entry count, 1..=256
//! [entries]   per entry: symbol u8, code_len u8 (1..=255),
//!             ceil(code_len / 8) code bytes, MSB-first packed
//! [1 byte]    padding count, 0..=7
//! [N bytes]   bit-packed payload, MSB-first within each byte
//! ```
//!
//! The table is self-describing: it preserves symbol identity and the
//! exact bit-string of every code, so an artifact decodes without any
//! external state. The padding count is the number of trailing zero
//! bits appended to the final payload byte; decoding strips exactly
//! that many bits before walking the stream.

use crate::codebook::{Code, CodeBook};
use crate::error::{CodecError, Result};

/// Bytes occupied by the entry-count prefix.
pub const TABLE_HEADER_SIZE: usize = 2;

/// The symbol domain is one byte, so a table never holds more entries.
pub const MAX_TABLE_ENTRIES: usize = 256;

/// Append the serialized code table to `out`.
///
/// Entries are emitted in ascending symbol order, so identical code
/// books always serialize to identical bytes.
pub fn write_table(book: &CodeBook, out: &mut Vec<u8>) {
    out.extend_from_slice(&(book.len() as u16).to_le_bytes());
    for (sym, code) in book.iter() {
        out.push(sym);
        out.push(code.len);
        out.extend_from_slice(&code.bits);
    }
}

/// Parse the embedded code table at the front of `artifact`.
///
/// Returns the `(symbol, code)` entries and the offset of the first
/// byte after the table (where the padding byte lives). Structural
/// violations are typed: a short buffer is `Truncated`, an invalid
/// count, duplicate symbol, or zero-length code is `MalformedTable`.
pub fn read_table(artifact: &[u8]) -> Result<(Vec<(u8, Code)>, usize)> {
    if artifact.len() < TABLE_HEADER_SIZE {
        return Err(CodecError::Truncated("table header"));
    }
    let count = u16::from_le_bytes([artifact[0], artifact[1]]) as usize;
    if count == 0 || count > MAX_TABLE_ENTRIES {
        return Err(CodecError::MalformedTable(format!(
            "entry count {count} outside 1..=256"
        )));
    }

    let mut entries = Vec::with_capacity(count);
    let mut seen = [false; 256];
    let mut off = TABLE_HEADER_SIZE;
    for _ in 0..count {
        if artifact.len() < off + 2 {
            return Err(CodecError::Truncated("table entry"));
        }
        let sym = artifact[off];
        let len = artifact[off + 1];
        off += 2;
        if len == 0 {
            return Err(CodecError::MalformedTable(format!(
                "symbol {sym:#04x} has a zero-length code"
            )));
        }
        if seen[sym as usize] {
            return Err(CodecError::MalformedTable(format!(
                "symbol {sym:#04x} appears twice"
            )));
        }
        seen[sym as usize] = true;

        let nbytes = (len as usize).div_ceil(8);
        if artifact.len() < off + nbytes {
            return Err(CodecError::Truncated("table entry code bits"));
        }
        entries.push((
            sym,
            Code {
                len,
                bits: artifact[off..off + nbytes].to_vec(),
            },
        ));
        off += nbytes;
    }

    Ok((entries, off))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FreqTable;
    use crate::tree::Node;

    fn table_bytes(input: &[u8]) -> Vec<u8> {
        let freq = FreqTable::from_bytes(input).unwrap();
        let book = CodeBook::from_tree(&Node::build(&freq)).unwrap();
        let mut out = Vec::new();
        write_table(&book, &mut out);
        out
    }

    #[test]
    fn table_round_trips() {
        let bytes = table_bytes(b"abracadabra");
        let (entries, end) = read_table(&bytes).unwrap();
        assert_eq!(end, bytes.len());
        let syms: Vec<u8> = entries.iter().map(|&(s, _)| s).collect();
        assert_eq!(syms, vec![b'a', b'b', b'c', b'd', b'r']);
    }

    #[test]
    fn short_header_is_truncated() {
        assert!(matches!(
            read_table(&[0x01]),
            Err(CodecError::Truncated("table header"))
        ));
    }

    #[test]
    fn zero_count_is_malformed() {
        assert!(matches!(
            read_table(&[0x00, 0x00, 0xFF]),
            Err(CodecError::MalformedTable(_))
        ));
    }

    #[test]
    fn zero_length_code_is_malformed() {
        // count=1, symbol 'a', code_len 0
        assert!(matches!(
            read_table(&[0x01, 0x00, b'a', 0x00]),
            Err(CodecError::MalformedTable(_))
        ));
    }

    #[test]
    fn duplicate_symbol_is_malformed() {
        // count=2, two entries for 'a' with 1-bit codes
        let buf = [0x02, 0x00, b'a', 0x01, 0x00, b'a', 0x01, 0x80];
        assert!(matches!(
            read_table(&buf),
            Err(CodecError::MalformedTable(_))
        ));
    }

    #[test]
    fn truncated_entry_is_detected() {
        let mut bytes = table_bytes(b"abracadabra");
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(read_table(&bytes), Err(CodecError::Truncated(_))));
    }
}
