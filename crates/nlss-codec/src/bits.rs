use std::ops::Deref;

use crate::error::{CodecError, CodecResult};

/// An ordered sequence of 0/1 values.
///
/// Bits are stored one per `u8`. Expansion from bytes is MSB-first, so bit
/// `8 * i` of the sequence is the high bit of byte `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitSequence(Vec<u8>);

impl BitSequence {
    /// Expand a byte slice into its bits, most significant first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1);
            }
        }
        Self(bits)
    }

    /// Wrap an existing 0/1 array.
    pub fn from_values(values: Vec<u8>) -> Self {
        Self(values)
    }

    /// Pack the sequence back into bytes. See [`bits_to_bytes`].
    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        bits_to_bytes(&self.0)
    }

    /// The bit at `index`, or 0 when `index` is past the end.
    pub fn bit_or_zero(&self, index: usize) -> u8 {
        self.0.get(index).copied().unwrap_or(0)
    }

    /// Collect the bits at `positions`, in order.
    ///
    /// Positions past the end of the sequence read as 0 rather than failing.
    /// Signing positions span a 2048-bit window that a short share may not
    /// cover, so this lenient lookup is part of the signature format.
    pub fn gather(&self, positions: &[usize]) -> Self {
        Self(positions.iter().map(|&p| self.bit_or_zero(p)).collect())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for BitSequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

/// Expand bytes into an MSB-first bit sequence.
pub fn bytes_to_bits(bytes: &[u8]) -> BitSequence {
    BitSequence::from_bytes(bytes)
}

/// Pack an MSB-first bit sequence into bytes.
///
/// Only elements equal to 1 set a bit; anything else packs as 0. Fails with
/// [`CodecError::MalformedLength`] unless the length is a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> CodecResult<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(CodecError::MalformedLength { len: bits.len() });
    }
    Ok(bits
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit == 1))
        })
        .collect())
}

/// Render each element as `'1'` if it equals exactly 1, `'0'` otherwise.
///
/// This is not a binary formatter: a position value such as 1024 renders as
/// `'0'`. The hash chain in the signature scheme depends on this mapping.
pub fn indicator_string<T>(values: &[T]) -> String
where
    T: Copy + PartialEq + From<u8>,
{
    let one = T::from(1);
    values
        .iter()
        .map(|&v| if v == one { '1' } else { '0' })
        .collect()
}
