use nlss_codec::indicator_string;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{NlssError, NlssResult};
use crate::hash::sha3_256_hex;

/// Number of byte-aligned positions derived per signature.
pub const POSITION_COUNT: usize = 32;
/// Consecutive bits taken from each position.
pub const BITS_PER_POSITION: usize = 8;
/// Total signing positions, and bits in a signature.
pub const SIGN_POSITION_COUNT: usize = POSITION_COUNT * BITS_PER_POSITION;

const POSITION_SPACE: usize = 2048;

/// Which side of the protocol is deriving positions.
///
/// The two roles produce the same positions from the same chain of hashes;
/// they differ only in where each link's window bits come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Reads window bits from the private share at the aligned position.
    Signer,
    /// Reads window bits sequentially from the signature.
    Verifier,
}

/// Positions derived from a transaction hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandPos {
    /// Byte-aligned start of each position. Always [`POSITION_COUNT`] slots;
    /// slots past the requested count stay 0.
    #[serde(rename = "originalPos")]
    pub original_positions: Vec<usize>,
    /// Bit indices to sign, eight consecutive per position, each run starting
    /// at the aligned position. Always [`SIGN_POSITION_COUNT`] slots.
    #[serde(rename = "posForSign")]
    pub positions_for_sign: Vec<usize>,
}

/// The un-aligned position for index `k` given hash digit `digit`.
pub fn random_position(k: usize, digit: usize) -> usize {
    ((2402 + digit) * 2709 + (k + 2709 + digit)) % POSITION_SPACE
}

/// Derive `count` signing positions from `hash` and a secret bit array.
///
/// Each iteration reads the k-th hex digit of the current hash, places a
/// position from it rounded down to a byte boundary, and then replaces the
/// hash with `SHA3-256(hash ‖ indicator(original_positions) ‖ indicator(window))`.
/// The window is the secret at the position for the signer and the next
/// eight secret bits for the verifier. Those are the same bits once the
/// signer's windows have been packed into a signature, which lets a verifier
/// holding only the signature replay the signer's chain.
///
/// # Errors
///
/// - [`NlssError::TooManyPositions`] if `count` exceeds [`POSITION_COUNT`].
/// - [`NlssError::HashTooShort`] / [`NlssError::InvalidHashDigit`] unless the
///   first `count` characters of `hash` are hex digits.
/// - [`NlssError::InsufficientSecretBits`] if a verifier supplies fewer than
///   `8 * count` bits.
pub fn derive(role: Role, hash: &str, count: usize, secret_bits: &[u8]) -> NlssResult<RandPos> {
    if count > POSITION_COUNT {
        return Err(NlssError::TooManyPositions {
            requested: count,
            max: POSITION_COUNT,
        });
    }
    if hash.len() < count {
        return Err(NlssError::HashTooShort {
            required: count,
            actual: hash.len(),
        });
    }
    for index in 0..count {
        hex_digit(hash, index)?;
    }
    if role == Role::Verifier && secret_bits.len() < count * BITS_PER_POSITION {
        return Err(NlssError::InsufficientSecretBits {
            required: count * BITS_PER_POSITION,
            actual: secret_bits.len(),
        });
    }

    let mut original_positions = vec![0usize; POSITION_COUNT];
    let mut positions_for_sign = vec![0usize; SIGN_POSITION_COUNT];
    let mut link = hash.to_owned();
    let mut cursor = 0usize;

    for k in 0..count {
        let digit = hex_digit(&link, k)?;
        let start = random_position(k, digit);
        let aligned = start / BITS_PER_POSITION * BITS_PER_POSITION;
        original_positions[k] = aligned;

        let run = &mut positions_for_sign[k * BITS_PER_POSITION..(k + 1) * BITS_PER_POSITION];
        for (slot, position) in run.iter_mut().zip(aligned..) {
            *slot = position;
        }

        let window: Vec<u8> = match role {
            Role::Signer => (aligned..aligned + BITS_PER_POSITION)
                .map(|p| secret_bits.get(p).copied().unwrap_or(0))
                .collect(),
            Role::Verifier => {
                let bits = secret_bits[cursor..cursor + BITS_PER_POSITION].to_vec();
                cursor += BITS_PER_POSITION;
                bits
            }
        };

        link = sha3_256_hex(&[
            &link,
            &indicator_string(&original_positions),
            &indicator_string(&window),
        ]);
        trace!(k, digit, start, aligned, "derived signing position");
    }

    Ok(RandPos {
        original_positions,
        positions_for_sign,
    })
}

fn hex_digit(hash: &str, index: usize) -> NlssResult<usize> {
    hash.as_bytes()
        .get(index)
        .and_then(|&b| char::from(b).to_digit(16))
        .map(|d| d as usize)
        .ok_or(NlssError::InvalidHashDigit { index })
}
