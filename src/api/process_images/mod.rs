// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process images endpoint module
//!
//! Provides POST /api/process-images for turning listing photos into
//! normalized images with a description and a social caption.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::process_images_handler;
pub use request::read_upload_batch;
pub use response::ProcessImagesResponse;
