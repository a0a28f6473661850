// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart intake for the process images endpoint

use axum_extra::extract::multipart::{Multipart, MultipartError};
use tracing::{debug, warn};

use crate::api::errors::ApiError;
use crate::pipeline::{UploadBatch, UploadEntry};

/// Read every part of the multipart body, in order, into an `UploadBatch`.
///
/// Filtering of non-photo parts is left to the pipeline; this only fails on
/// a malformed or truncated body.
pub async fn read_upload_batch(mut multipart: Multipart) -> Result<UploadBatch, ApiError> {
    let mut batch = UploadBatch::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let bytes = field.bytes().await.map_err(multipart_error)?;

        debug!(
            "Received part: field={}, file={:?}, type={:?}, {} bytes",
            field_name,
            file_name,
            content_type,
            bytes.len()
        );

        batch.push(UploadEntry {
            field_name,
            file_name,
            content_type,
            bytes,
        });
    }

    Ok(batch)
}

fn multipart_error(e: MultipartError) -> ApiError {
    warn!("Failed to read multipart body: {}", e);
    ApiError::from_transport(e.status(), e.body_text())
}
