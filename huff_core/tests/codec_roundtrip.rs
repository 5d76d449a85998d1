/// Integration tests for the codec: round-trip law, prefix-free code
/// tables, padding arithmetic, and the corruption battery.
use huff_core::{artifact, compress, decompress, CodeBook, CodecError, FreqTable, Node};

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `len` highly compressible bytes (repeating pattern).
fn compressible_bytes(len: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog. ";
    (0..len).map(|i| pattern[i % pattern.len()]).collect()
}

// ── round-trip law ─────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_compressible() {
    let data = compressible_bytes(100_000);
    let artifact = compress(&data).unwrap();
    assert_eq!(decompress(&artifact).unwrap(), data);
    assert!(
        artifact.len() < data.len(),
        "skewed text should shrink: artifact={} raw={}",
        artifact.len(),
        data.len()
    );
}

#[test]
fn test_roundtrip_pseudo_random() {
    let data = pseudo_random_bytes(64 * 1024, 0xDEAD_BEEF);
    let artifact = compress(&data).unwrap();
    assert_eq!(decompress(&artifact).unwrap(), data);
}

#[test]
fn test_roundtrip_all_byte_values() {
    let data: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
    let artifact = compress(&data).unwrap();
    assert_eq!(decompress(&artifact).unwrap(), data);
}

#[test]
fn test_roundtrip_one_byte_input() {
    let artifact = compress(b"x").unwrap();
    assert_eq!(decompress(&artifact).unwrap(), b"x");
}

#[test]
fn test_roundtrip_many_short_inputs() {
    for len in 1..=64 {
        let data = pseudo_random_bytes(len, len as u64 * 7 + 1);
        let artifact = compress(&data).unwrap();
        assert_eq!(decompress(&artifact).unwrap(), data, "len={len}");
    }
}

// ── single-symbol edge case ────────────────────────────────────────────────

#[test]
fn test_single_symbol_gets_nonempty_code() {
    let data = vec![b'q'; 1000];
    let freq = FreqTable::from_bytes(&data).unwrap();
    let book = CodeBook::from_tree(&Node::build(&freq)).unwrap();
    assert!(book.get(b'q').unwrap().len >= 1, "code must never be empty");

    let artifact = compress(&data).unwrap();
    assert_eq!(decompress(&artifact).unwrap(), data);
}

// ── prefix-free invariant ──────────────────────────────────────────────────

#[test]
fn test_codes_are_prefix_free() {
    let data = pseudo_random_bytes(8192, 42);
    let freq = FreqTable::from_bytes(&data).unwrap();
    let book = CodeBook::from_tree(&Node::build(&freq)).unwrap();
    let strings: Vec<String> = book.iter().map(|(_, c)| c.to_bit_string()).collect();
    for (i, a) in strings.iter().enumerate() {
        for (j, b) in strings.iter().enumerate() {
            if i != j {
                assert!(!b.starts_with(a.as_str()), "{a} is a prefix of {b}");
            }
        }
    }
}

// ── padding correctness ────────────────────────────────────────────────────

#[test]
fn test_padding_zero_when_bits_align() {
    // Two symbols, four of each: eight 1-bit codes = exactly one byte.
    let artifact = compress(b"aaaabbbb").unwrap();
    let (_, table_end) = artifact::read_table(&artifact).unwrap();
    assert_eq!(artifact[table_end], 0, "aligned stream must get padding 0");
    assert_eq!(artifact.len(), table_end + 2);
    assert_eq!(decompress(&artifact).unwrap(), b"aaaabbbb");
}

#[test]
fn test_padding_fills_to_byte_boundary() {
    // Three 1-bit codes: 3 bits, so padding must be 5.
    let artifact = compress(b"aab").unwrap();
    let (_, table_end) = artifact::read_table(&artifact).unwrap();
    assert_eq!(artifact[table_end], 5);
    assert_eq!(decompress(&artifact).unwrap(), b"aab");
}

// ── concrete scenario from the format definition ───────────────────────────

#[test]
fn test_aaab_scenario() {
    // freq {a:3, b:1}; the lighter leaf goes left, so b="0", a="1".
    // Encoded bits "1110", padding 4, one payload byte 0b1110_0000.
    let artifact = compress(b"aaab").unwrap();
    let (entries, table_end) = artifact::read_table(&artifact).unwrap();
    assert_eq!(entries.len(), 2);
    for (sym, code) in &entries {
        assert_eq!(code.len, 1, "symbol {sym:#04x} should get a 1-bit code");
    }
    assert_eq!(artifact[table_end], 4, "padding byte");
    assert_eq!(&artifact[table_end + 1..], &[0b1110_0000], "payload");
    assert_eq!(decompress(&artifact).unwrap(), b"aaab");
}

// ── determinism / dedup precondition ───────────────────────────────────────

#[test]
fn test_identical_inputs_yield_identical_artifacts() {
    let data = pseudo_random_bytes(10_000, 7);
    let a = compress(&data).unwrap();
    let b = compress(&data).unwrap();
    assert_eq!(a, b, "same input must produce byte-identical artifacts");
}

// ── corruption detection ───────────────────────────────────────────────────

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(compress(b""), Err(CodecError::EmptyInput)));
}

#[test]
fn test_empty_artifact_rejected() {
    assert!(matches!(decompress(b""), Err(CodecError::Truncated(_))));
}

#[test]
fn test_table_only_artifact_rejected() {
    let artifact = compress(b"hello world").unwrap();
    let (_, table_end) = artifact::read_table(&artifact).unwrap();
    let err = decompress(&artifact[..table_end]).unwrap_err();
    assert!(matches!(err, CodecError::Truncated("padding byte")), "{err}");
}

#[test]
fn test_missing_payload_rejected() {
    let artifact = compress(b"hello world").unwrap();
    let (_, table_end) = artifact::read_table(&artifact).unwrap();
    let err = decompress(&artifact[..table_end + 1]).unwrap_err();
    assert!(matches!(err, CodecError::Truncated("payload")), "{err}");
}

#[test]
fn test_truncated_table_rejected() {
    let artifact = compress(b"hello world").unwrap();
    let err = decompress(&artifact[..3]).unwrap_err();
    assert!(
        matches!(err, CodecError::Truncated(_) | CodecError::MalformedTable(_)),
        "{err}"
    );
}

#[test]
fn test_garbage_is_not_silently_decoded() {
    // A buffer of 0xFF claims 65535 table entries; must fail cleanly.
    let garbage = vec![0xFF; 64];
    assert!(decompress(&garbage).is_err());
}

#[test]
fn test_trailing_bits_beyond_padding_rejected() {
    // Handcraft an artifact whose valid bits end mid-code:
    // table: a="0", b="10"; padding 0; payload byte "10101011" walks
    // a trie path that ends on the incomplete code "1".
    let table = [
        0x02, 0x00, // 2 entries
        b'a', 0x01, 0b0000_0000, // a = "0"
        b'b', 0x02, 0b1000_0000, // b = "10"
    ];
    let mut artifact = table.to_vec();
    artifact.push(0); // padding
    artifact.push(0b1010_1011);
    let err = decompress(&artifact).unwrap_err();
    assert!(
        matches!(
            err,
            CodecError::TrailingBits { .. } | CodecError::UndecodableBits { .. }
        ),
        "{err}"
    );
}
