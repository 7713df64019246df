use thiserror::Error;

/// Errors produced by bit and pixel transcoding.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed bit length: {len} is not a multiple of 8")]
    MalformedLength { len: usize },

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("image encode error: {0}")]
    ImageEncode(image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;
