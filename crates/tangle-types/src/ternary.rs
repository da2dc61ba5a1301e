//! Fixed-width balanced-ternary buffers and tryte text conversion.
//!
//! Every ledger field has a fixed trit length per semantic role; buffers are
//! never resized after creation. Wire text renders three trits as one tryte
//! character from a 27-symbol alphabet.

use std::fmt;

use crate::error::{Error, Result};

/// Trit length of a transaction, bundle, trunk or branch hash (81 trytes).
pub const HASH_TRITS: usize = 243;
/// Trit length of a tag or obsolete tag (27 trytes).
pub const TAG_TRITS: usize = 81;
/// Trit length of a nonce (27 trytes).
pub const NONCE_TRITS: usize = 81;
/// Trit length of a signature-and-message fragment (2187 trytes).
pub const SIGNATURE_TRITS: usize = 6561;

/// Three trits form one tryte.
pub const TRITS_PER_TRYTE: usize = 3;

/// Decode one tryte character to its balanced value in -13..=13.
fn tryte_value(c: u8) -> Option<i8> {
    match c {
        b'9' => Some(0),
        b'A'..=b'M' => Some((c - b'A') as i8 + 1),
        b'N'..=b'Z' => Some((c - b'N') as i8 - 13),
        _ => None,
    }
}

/// Encode one balanced tryte value in -13..=13 as its alphabet character.
fn tryte_char(value: i8) -> char {
    let c = match value {
        0 => b'9',
        1..=13 => b'A' + (value as u8 - 1),
        _ => b'N' + (value + 13) as u8,
    };
    c as char
}

/// A fixed-width packed ternary value.
///
/// Trits are packed three per byte: each byte holds one balanced-tryte value
/// in -13..=13 (`i8` bit pattern). The logical trit count is carried
/// alongside, so the buffer is self-describing.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TernaryBuffer {
    bytes: Vec<u8>,
    num_trits: usize,
}

impl TernaryBuffer {
    /// Allocate a zero-valued buffer of `num_trits` trits.
    ///
    /// All role lengths in this workspace are tryte-aligned.
    pub fn zero(num_trits: usize) -> Self {
        debug_assert!(num_trits % TRITS_PER_TRYTE == 0, "trit length must be tryte-aligned");
        Self {
            bytes: vec![0; num_trits / TRITS_PER_TRYTE],
            num_trits,
        }
    }

    /// Decode tryte text of any length.
    ///
    /// Fails with [`Error::InvalidEncoding`] when the text contains a
    /// character outside the tryte alphabet.
    pub fn from_trytes(trytes: &str) -> Result<Self> {
        let mut bytes = Vec::with_capacity(trytes.len());
        for c in trytes.bytes() {
            let value = tryte_value(c).ok_or_else(|| {
                Error::InvalidEncoding(format!("'{}' is not a tryte character", c as char))
            })?;
            bytes.push(value as u8);
        }
        let num_trits = bytes.len() * TRITS_PER_TRYTE;
        Ok(Self { bytes, num_trits })
    }

    /// Decode tryte text that must represent exactly `num_trits` trits.
    ///
    /// No implicit truncation or padding: a length mismatch is
    /// [`Error::LengthMismatch`], never silently corrected.
    pub fn from_trytes_exact(trytes: &str, num_trits: usize) -> Result<Self> {
        let buf = Self::from_trytes(trytes)?;
        if buf.num_trits != num_trits {
            return Err(Error::LengthMismatch {
                expected: num_trits,
                actual: buf.num_trits,
            });
        }
        Ok(buf)
    }

    /// Render as tryte text. Lossless inverse of [`TernaryBuffer::from_trytes`].
    pub fn to_trytes(&self) -> String {
        self.bytes.iter().map(|&b| tryte_char(b as i8)).collect()
    }

    /// Logical number of trits represented.
    pub fn num_trits(&self) -> usize {
        self.num_trits
    }

    /// Number of trytes (and packed bytes).
    pub fn num_trytes(&self) -> usize {
        self.bytes.len()
    }

    /// Raw packed bytes, one balanced-tryte value per byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for TernaryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trytes = self.to_trytes();
        if trytes.len() > 16 {
            write!(f, "TernaryBuffer({}.., {} trits)", &trytes[..16], self.num_trits)
        } else {
            write!(f, "TernaryBuffer({}, {} trits)", trytes, self.num_trits)
        }
    }
}
