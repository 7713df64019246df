use nlss_codec::CodecError;
use thiserror::Error;

/// Errors from share reconstruction, position derivation, and signatures.
#[derive(Debug, Error)]
pub enum NlssError {
    #[error("public share too small: need {required} bits, got {actual}")]
    InsufficientPublicData { required: usize, actual: usize },

    #[error("no private byte satisfies the parity constraint at index {index}")]
    UnsatisfiableConstraint { index: usize },

    #[error("parity mismatch at index {index}: expected {expected}, got {actual}")]
    ParityMismatch { index: usize, expected: u8, actual: u8 },

    #[error("invalid hex digit in hash at index {index}")]
    InvalidHashDigit { index: usize },

    #[error("hash too short: need {required} characters, got {actual}")]
    HashTooShort { required: usize, actual: usize },

    #[error("too many positions requested: {requested} (max {max})")]
    TooManyPositions { requested: usize, max: usize },

    #[error("not enough secret bits: need {required}, got {actual}")]
    InsufficientSecretBits { required: usize, actual: usize },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("signature mismatch at byte {byte}")]
    SignatureMismatch { byte: usize },

    #[error("invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type NlssResult<T> = Result<T, NlssError>;
