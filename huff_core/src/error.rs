//! Error types for the codec.
//!
//! Every failure path returns a typed variant; nothing is swallowed and
//! no partial output is ever treated as valid.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec failures, split between bad input and corrupt artifacts.
///
/// `EmptyInput` is the only input-side error and fires before any tree
/// construction. Every other variant describes a corrupt or truncated
/// artifact seen on the decode side.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Nothing to compress. Raised before any tree work.
    #[error("input is empty: nothing to compress")]
    EmptyInput,

    /// A derived code exceeds the 255-bit limit the table format can hold.
    #[error("code length {len} exceeds the 255-bit table limit")]
    CodeTooLong { len: usize },

    /// The embedded code table is structurally invalid (bad entry count,
    /// duplicate symbol, zero-length code, prefix violation, bad padding).
    #[error("malformed code table: {0}")]
    MalformedTable(String),

    /// The artifact ends before the named section is complete.
    #[error("truncated artifact: missing {0}")]
    Truncated(&'static str),

    /// The payload walked onto a bit path with no code assigned.
    #[error("undecodable bit sequence at bit {bit}")]
    UndecodableBits { bit: usize },

    /// The payload ended mid-code: bits beyond the declared padding that
    /// do not complete any code.
    #[error("{leftover} trailing payload bits do not complete a code")]
    TrailingBits { leftover: usize },
}
