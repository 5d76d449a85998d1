//! Bit-level I/O, MSB-first within each byte.
//!
//! The first bit written becomes the high-order bit of the first output
//! byte; the reader consumes in the same order. The writer reports how
//! many zero bits it appended to reach a byte boundary — that count is
//! what the artifact records as its padding byte — and the reader is
//! bounded by an explicit valid-bit count so padding is never consumed
//! as data.

use crate::codebook::Code;

/// Accumulates bits MSB-first and flushes complete bytes.
///
/// Invariant: `used` is always < 8; a full accumulator is flushed
/// immediately.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    acc: u8,
    used: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single bit.
    #[inline]
    pub fn push_bit(&mut self, bit: bool) {
        if bit {
            self.acc |= 1 << (7 - self.used);
        }
        self.used += 1;
        if self.used == 8 {
            self.bytes.push(self.acc);
            self.acc = 0;
            self.used = 0;
        }
    }

    /// Append all bits of `code`, first bit first.
    pub fn write_code(&mut self, code: &Code) {
        for i in 0..code.len as usize {
            self.push_bit(code.bit(i));
        }
    }

    /// Total bits written so far, including the partial byte.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.used as usize
    }

    /// Flush, zero-padding any final partial byte.
    ///
    /// Returns the packed bytes and the padding count: `(8 - bits % 8)
    /// % 8`, so a stream already on a byte boundary gets padding 0,
    /// never 8.
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        let padding = if self.used == 0 { 0 } else { 8 - self.used };
        if self.used > 0 {
            self.bytes.push(self.acc);
        }
        (self.bytes, padding)
    }
}

/// Reads bits MSB-first from a byte slice, stopping at `valid_bits`.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    valid_bits: usize,
}

impl<'a> BitReader<'a> {
    /// `valid_bits` must not exceed `data.len() * 8`; bits past it
    /// (the padding) are unreachable.
    pub fn new(data: &'a [u8], valid_bits: usize) -> Self {
        debug_assert!(valid_bits <= data.len() * 8);
        Self {
            data,
            pos: 0,
            valid_bits,
        }
    }

    /// The next bit, or `None` once all valid bits are consumed.
    #[inline]
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.pos >= self.valid_bits {
            return None;
        }
        let bit = (self.data[self.pos / 8] >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}
