// SPDX-License-Identifier: MIT
//
// Image loading and encoding. Decodes an uploaded file into an in-memory
// raster and re-encodes results, using the `image` crate. Deliberately no
// transformation methods: the two compositors consume the decoded raster
// directly.

use gavelmark_core::error::{GavelmarkError, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, info, instrument};

/// A decoded source photo.
#[derive(Debug)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            GavelmarkError::ImageDecode(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "image loaded");
        Ok(Self { image: img })
    }

    /// Decode an image from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| GavelmarkError::ImageDecode(format!("failed to decode image: {err}")))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Copy out as an RGBA buffer.
    pub fn to_rgba8(&self) -> RgbaImage {
        self.image.to_rgba8()
    }
}

/// Encode a `DynamicImage` as PNG, returning the raw bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| GavelmarkError::ImageEncode(format!("PNG encoding failed: {err}")))?;
    Ok(buffer)
}

/// Encode a `DynamicImage` as JPEG with the given quality (1-100).
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let rgb = image.to_rgb8();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|err| GavelmarkError::ImageEncode(format!("JPEG encoding failed: {err}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn checkerboard(w: u32, h: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([20, 20, 20, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn png_roundtrip_preserves_dimensions() {
        let bytes = encode_png(&checkerboard(32, 48)).unwrap();
        let back = SourceImage::from_bytes(&bytes).unwrap();
        assert_eq!(back.width(), 32);
        assert_eq!(back.height(), 48);
    }

    #[test]
    fn jpeg_encode_produces_jfif_bytes() {
        let bytes = encode_jpeg(&checkerboard(16, 16), 90).unwrap();
        // JPEG SOI marker.
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let err = SourceImage::from_bytes(&[0, 1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, GavelmarkError::ImageDecode(_)));
    }

    #[test]
    fn open_missing_file_fails_with_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceImage::open(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, GavelmarkError::ImageDecode(_)));
    }

    #[test]
    fn open_reads_encoded_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, encode_png(&checkerboard(24, 24)).unwrap()).unwrap();
        let src = SourceImage::open(&path).unwrap();
        assert_eq!(src.width(), 24);
        assert_eq!(src.height(), 24);
    }
}
