//! Bit and pixel transcoding for NLSS share images.
//!
//! Share images (DID, public share, private share) are handled as flat RGB
//! byte buffers. [`bits`] converts between those buffers and MSB-first bit
//! sequences; [`pixels`] moves buffers in and out of image files.

pub mod bits;
pub mod error;
pub mod pixels;

pub use bits::{bits_to_bytes, bytes_to_bits, indicator_string, BitSequence};
pub use error::{CodecError, CodecResult};
pub use pixels::{
    decode, encode, encode_share, SHARE_CANVAS_BYTES, SHARE_CANVAS_HEIGHT, SHARE_CANVAS_WIDTH,
};
