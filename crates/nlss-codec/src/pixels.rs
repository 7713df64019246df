use std::io::{BufWriter, Write};
use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbaImage};
use tracing::debug;

use crate::error::{CodecError, CodecResult};

/// Width of the canvas every private share image is written on.
pub const SHARE_CANVAS_WIDTH: u32 = 1024;
/// Height of the canvas every private share image is written on.
pub const SHARE_CANVAS_HEIGHT: u32 = 512;
/// Byte length of an RGB buffer on the share canvas.
pub const SHARE_CANVAS_BYTES: usize =
    SHARE_CANVAS_WIDTH as usize * SHARE_CANVAS_HEIGHT as usize * 3;

/// Decode an image file into its RGB bytes.
///
/// Pixels are emitted row-major, top to bottom and left to right, three
/// bytes per pixel in R, G, B order. Every sample is widened to 16 bits,
/// premultiplied by alpha, and truncated to its high byte; alpha itself is
/// dropped. For opaque images this is the plain 8-bit channel value.
pub fn decode(path: impl AsRef<Path>) -> CodecResult<Vec<u8>> {
    let path = path.as_ref();
    let img = ImageReader::open(path)
        .map_err(ImageError::IoError)?
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()?;

    let pixels = rgb_bytes(&img);
    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        bytes = pixels.len(),
        "decoded share image"
    );
    Ok(pixels)
}

/// Encode an RGB buffer as an opaque PNG of the given dimensions.
///
/// Fails with [`CodecError::SizeMismatch`] unless `bytes` holds exactly
/// `width * height * 3` bytes. The image is written to a temporary file next
/// to `path` and renamed over it once complete, so a failed encode never
/// leaves a partial file at `path`.
pub fn encode(bytes: &[u8], width: u32, height: u32, path: impl AsRef<Path>) -> CodecResult<()> {
    let path = path.as_ref();
    let expected = width as usize * height as usize * 3;
    if bytes.len() != expected {
        return Err(CodecError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let mut rgba = Vec::with_capacity(expected / 3 * 4);
    for px in bytes.chunks_exact(3) {
        rgba.extend_from_slice(px);
        rgba.push(u8::MAX);
    }
    let img = RgbaImage::from_raw(width, height, rgba).ok_or(CodecError::SizeMismatch {
        expected,
        actual: bytes.len(),
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        img.write_to(&mut writer, ImageFormat::Png)
            .map_err(CodecError::ImageEncode)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| CodecError::Io(e.error))?;

    debug!(path = %path.display(), width, height, "wrote share image");
    Ok(())
}

/// Encode an RGB buffer on the fixed 1024x512 share canvas.
pub fn encode_share(bytes: &[u8], path: impl AsRef<Path>) -> CodecResult<()> {
    encode(bytes, SHARE_CANVAS_WIDTH, SHARE_CANVAS_HEIGHT, path)
}

fn rgb_bytes(img: &DynamicImage) -> Vec<u8> {
    let color = img.color();
    let wide = color.bytes_per_pixel() / color.channel_count() > 1;
    let mut out = Vec::with_capacity(img.width() as usize * img.height() as usize * 3);

    if wide {
        for px in img.to_rgba16().pixels() {
            let [r, g, b, a] = px.0;
            out.extend_from_slice(&[
                premultiplied_high_byte(r, a),
                premultiplied_high_byte(g, a),
                premultiplied_high_byte(b, a),
            ]);
        }
    } else {
        for px in img.to_rgba8().pixels() {
            let [r, g, b, a] = px.0.map(widen);
            out.extend_from_slice(&[
                premultiplied_high_byte(r, a),
                premultiplied_high_byte(g, a),
                premultiplied_high_byte(b, a),
            ]);
        }
    }
    out
}

fn widen(sample: u8) -> u16 {
    u16::from(sample) * 0x101
}

fn premultiplied_high_byte(channel: u16, alpha: u16) -> u8 {
    let scaled = u32::from(channel) * u32::from(alpha) / 0xFFFF;
    (scaled >> 8) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    #[test]
    fn encode_then_decode_preserves_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        let bytes: Vec<u8> = (0..4 * 2 * 3).map(|i| (i * 13) as u8).collect();

        encode(&bytes, 4, 2, &path).unwrap();
        assert_eq!(decode(&path).unwrap(), bytes);
    }

    #[test]
    fn encode_rejects_wrong_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");

        let err = encode(&[0u8; 10], 2, 2, &path).unwrap_err();
        assert!(matches!(
            err,
            CodecError::SizeMismatch { expected: 12, actual: 10 }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn share_canvas_enforces_fixed_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pvtShare.png");

        let err = encode_share(&vec![0u8; SHARE_CANVAS_BYTES - 3], &path).unwrap_err();
        assert!(matches!(
            err,
            CodecError::SizeMismatch { expected: SHARE_CANVAS_BYTES, .. }
        ));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn encode_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        std::fs::write(&path, b"stale").unwrap();

        encode(&[9, 8, 7], 1, 1, &path).unwrap();
        assert_eq!(decode(&path).unwrap(), vec![9, 8, 7]);
    }

    #[test]
    fn decode_drops_alpha_of_opaque_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opaque.png");
        let img: RgbaImage =
            ImageBuffer::from_fn(2, 1, |x, _| Rgba([10 + x as u8, 20, 30, 255]));
        img.save(&path).unwrap();

        assert_eq!(decode(&path).unwrap(), vec![10, 20, 30, 11, 20, 30]);
    }

    #[test]
    fn decode_premultiplies_translucent_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translucent.png");
        let img: RgbaImage = ImageBuffer::from_pixel(1, 1, Rgba([200, 100, 255, 128]));
        img.save(&path).unwrap();

        // 200 * 0x101 * 128 * 0x101 / 0xFFFF = 25800, high byte 100
        assert_eq!(decode(&path).unwrap(), vec![100, 50, 128]);
    }

    #[test]
    fn decode_truncates_sixteen_bit_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.png");
        let img: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(1, 1, Rgb([0x12FF, 0xAB01, 0x00FF]));
        img.save(&path).unwrap();

        assert_eq!(decode(&path).unwrap(), vec![0x12, 0xAB, 0x00]);
    }

    #[test]
    fn decode_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really").unwrap();

        assert!(matches!(decode(&path), Err(CodecError::ImageDecode(_))));
    }

    #[test]
    fn decode_missing_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, CodecError::ImageDecode(_)));
    }
}
