// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image handling for uploaded listing photos
//!
//! This module provides:
//! - Decoding of raw upload bytes with magic-byte format detection
//! - The fit-to-frame normalization applied to every accepted photo
//! - Data URI encoding for returning images inline in JSON

pub mod image_utils;
pub mod normalize;

pub use image_utils::{decode_image_bytes, detect_format, to_data_uri, ImageError, ImageInfo};
pub use normalize::{normalize_image, NormalizeConfig, NormalizeError, NormalizedImage};
