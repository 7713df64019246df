use std::fmt;
use std::str::FromStr;

use nlss_codec::BitSequence;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NlssError, NlssResult};
use crate::positions::{self, Role, POSITION_COUNT, SIGN_POSITION_COUNT};
use crate::reconstruct::parity;

/// Signature length in bytes.
pub const SIGNATURE_LEN: usize = SIGN_POSITION_COUNT / 8;

/// A private-share signature: 256 share bits packed MSB-first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "signature_serde")] [u8; SIGNATURE_LEN]);

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice that must be exactly [`SIGNATURE_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> NlssResult<Self> {
        let arr: [u8; SIGNATURE_LEN] =
            bytes
                .try_into()
                .map_err(|_| NlssError::InvalidSignatureLength {
                    expected: SIGNATURE_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> NlssResult<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| NlssError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Signature {
    type Err = NlssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign a private share for a transaction hash.
///
/// The signature is the private share's bits at the signer's
/// `positions_for_sign`, packed into 32 bytes.
pub fn sign(private_share: &[u8], hash: &str) -> NlssResult<Signature> {
    let bits = BitSequence::from_bytes(private_share);
    let rand_pos = positions::derive(Role::Signer, hash, POSITION_COUNT, &bits)?;
    let packed = bits.gather(&rand_pos.positions_for_sign).to_bytes()?;
    let signature = Signature::from_slice(&packed)?;
    debug!(hash = %short(hash), signature = ?signature, "signed private share");
    Ok(signature)
}

/// Apply the parity operator to two shares block by block.
///
/// Each 8-bit block of the inputs yields one output bit,
/// `Σ private_bit · public_bit mod 2`, and the output bits are packed
/// MSB-first.
///
/// # Errors
///
/// [`NlssError::LengthMismatch`] if the inputs differ in length;
/// [`NlssError::Codec`] (malformed length) if the block count is not a
/// multiple of 8.
pub fn combine(private: &[u8], public: &[u8]) -> NlssResult<Vec<u8>> {
    if private.len() != public.len() {
        return Err(NlssError::LengthMismatch {
            expected: private.len() * 8,
            actual: public.len() * 8,
        });
    }
    let bits: Vec<u8> = private
        .iter()
        .zip(public)
        .map(|(&pvt, &pbl)| parity(pbl, pvt))
        .collect();
    Ok(BitSequence::from_values(bits).to_bytes()?)
}

/// Verify a signature against the DID and public share it claims to match.
///
/// The verifier replays the position chain from the signature bits, selects
/// the public share at `positions_for_sign` and the DID at each
/// `original_positions[i] / 8`, and checks
/// `combine(signature, public_selected) == did_selected`.
///
/// # Errors
///
/// [`NlssError::SignatureMismatch`] with the first differing byte, or any
/// error from position derivation.
pub fn verify(did: &[u8], public: &[u8], hash: &str, signature: &Signature) -> NlssResult<()> {
    let signature_bits = BitSequence::from_bytes(signature.as_bytes());
    let rand_pos = positions::derive(Role::Verifier, hash, POSITION_COUNT, &signature_bits)?;

    let public_selected = BitSequence::from_bytes(public)
        .gather(&rand_pos.positions_for_sign)
        .to_bytes()?;

    // DID bits are indexed by the byte offset of each aligned position.
    let did_positions: Vec<usize> = rand_pos
        .original_positions
        .iter()
        .map(|&p| p / 8)
        .collect();
    let did_selected = BitSequence::from_bytes(did).gather(&did_positions).to_bytes()?;

    let combined = combine(signature.as_bytes(), &public_selected)?;
    if let Some(byte) = combined
        .iter()
        .zip(&did_selected)
        .position(|(a, b)| a != b)
    {
        debug!(hash = %short(hash), byte, "signature mismatch");
        return Err(NlssError::SignatureMismatch { byte });
    }

    debug!(hash = %short(hash), "signature verified");
    Ok(())
}

fn short(hash: &str) -> &str {
    hash.get(..8).unwrap_or(hash)
}

mod signature_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::SIGNATURE_LEN;

    pub fn serialize<S>(sig: &[u8; SIGNATURE_LEN], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(sig))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; SIGNATURE_LEN], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32-byte signature"))
    }
}
