// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fit-to-frame normalization for listing photos
//!
//! Every accepted upload is scaled to cover a fixed canonical frame, center
//! cropped to exactly that frame and re-encoded as JPEG at a fixed quality.
//! The transform is pure: identical bytes and config give identical output.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;

use super::image_utils::{decode_image_bytes, ImageError};

/// Media type of every normalized image
pub const NORMALIZED_MEDIA_TYPE: &str = "image/jpeg";

/// Default canonical frame width
pub const DEFAULT_FRAME_WIDTH: u32 = 1200;

/// Default canonical frame height
pub const DEFAULT_FRAME_HEIGHT: u32 = 800;

/// Default JPEG quality
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Decode(#[from] ImageError),

    #[error("Invalid normalization config: {0}")]
    InvalidConfig(String),

    #[error("Failed to encode JPEG: {0}")]
    EncodeFailed(String),
}

/// Canonical frame and quality applied to every upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeConfig {
    pub width: u32,
    pub height: u32,
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl NormalizeConfig {
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if self.width == 0 || self.height == 0 {
            return Err(NormalizeError::InvalidConfig(format!(
                "frame must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(NormalizeError::InvalidConfig(format!(
                "quality must be between 1 and 100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// A re-encoded image fit to the canonical frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl NormalizedImage {
    pub fn media_type(&self) -> &'static str {
        NORMALIZED_MEDIA_TYPE
    }
}

/// Decode `bytes`, fit them to the configured frame and re-encode as JPEG
pub fn normalize_image(
    bytes: &[u8],
    config: &NormalizeConfig,
) -> Result<NormalizedImage, NormalizeError> {
    config.validate()?;

    let (image, _info) = decode_image_bytes(bytes)?;
    let framed = cover_and_center_crop(&image, config.width, config.height);

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(framed.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, config.quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| NormalizeError::EncodeFailed(e.to_string()))?;

    Ok(NormalizedImage {
        bytes: buffer.into_inner(),
        width: config.width,
        height: config.height,
    })
}

/// Crop the centered region with the frame's aspect ratio, then resize it to
/// the frame (no distortion).
///
/// The crop is taken in source coordinates so the only buffer allocated at
/// frame scale is the output itself, whatever the source aspect ratio.
fn cover_and_center_crop(image: &DynamicImage, target_w: u32, target_h: u32) -> DynamicImage {
    let (orig_w, orig_h) = image.dimensions();

    // Larger scale wins so both sides cover the frame
    let scale_w = target_w as f64 / orig_w as f64;
    let scale_h = target_h as f64 / orig_h as f64;
    let scale = scale_w.max(scale_h);

    let crop_w = ((target_w as f64 / scale).round() as u32).clamp(1, orig_w);
    let crop_h = ((target_h as f64 / scale).round() as u32).clamp(1, orig_h);

    let crop_x = (orig_w - crop_w) / 2;
    let crop_y = (orig_h - crop_h) / 2;

    image
        .crop_imm(crop_x, crop_y, crop_w, crop_h)
        .resize_exact(target_w, target_h, FilterType::Lanczos3)
}
