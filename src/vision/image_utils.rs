// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading and data URI helpers for uploaded listing photos

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Errors raised while turning uploaded bytes into an image
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes from a multipart upload
///
/// The declared content type of the upload is ignored; the format is
/// detected from the magic bytes so a mislabelled photo still decodes.
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If the bytes are empty or not a supported image
pub fn decode_image_bytes(bytes: &[u8]) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Detect image format from magic bytes
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    if bytes.len() < 4 {
        return Err(ImageError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(ImageFormat::WebP),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Ok(ImageFormat::Bmp),

        // TIFF: II (little-endian) or MM (big-endian)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => Ok(ImageFormat::Tiff),

        _ => Err(ImageError::UnsupportedFormat),
    }
}

/// Embed encoded image bytes in a `data:` URI the browser can render directly
pub fn to_data_uri(bytes: &[u8], media_type: &str) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}
