// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process images endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::{error, info, warn};

use super::request::read_upload_batch;
use super::response::ProcessImagesResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /api/process-images - Normalize listing photos and write copy for them
///
/// # Request
/// `multipart/form-data` with one file part per photo under `image_0`,
/// `image_1`, ... Other parts are ignored.
///
/// # Response
/// - `results`: one `{ image, description, socialContent }` per photo, in
///   upload order; `image` is a `data:image/jpeg;base64,` URI
///
/// # Errors
/// - 400 Bad Request: missing or malformed multipart body
/// - 413 Payload Too Large: body exceeds the configured ceiling
/// - 500 Internal Server Error: any photo failed; the whole batch is dropped
pub async fn process_images_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessImagesResponse>, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        warn!("Rejected process images request: {}", rejection.body_text());
        ApiError::from_transport(rejection.status(), rejection.body_text())
    })?;

    let batch = read_upload_batch(multipart).await?;
    info!(
        "Process images request: {} parts, {} images",
        batch.entries.len(),
        batch.accepted_count()
    );

    let results = state.pipeline.process_batch(batch).await.map_err(|e| {
        error!("Error processing images: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(ProcessImagesResponse::new(results)))
}

