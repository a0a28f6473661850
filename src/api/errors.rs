// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pipeline::PipelineError;

/// Message returned for any failure inside the pipeline
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process images";

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Malformed or missing multipart body
    InvalidRequest(String),
    PayloadTooLarge(String),
    /// Any decode, normalization or generation failure in the batch
    ProcessingFailed,
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ApiError::InvalidRequest(msg) => msg.clone(),
            ApiError::PayloadTooLarge(msg) => msg.clone(),
            ApiError::ProcessingFailed => PROCESSING_FAILED_MESSAGE.to_string(),
            ApiError::InternalError(msg) => msg.clone(),
        };

        ErrorResponse { error }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::ProcessingFailed | ApiError::InternalError(_) => 500,
        }
    }

    /// Map a transport-level status onto the taxonomy
    pub fn from_transport(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(message),
            s if s.is_server_error() => ApiError::InternalError(message),
            _ => ApiError::InvalidRequest(message),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(_: PipelineError) -> Self {
        ApiError::ProcessingFailed
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            ApiError::ProcessingFailed => write!(f, "{}", PROCESSING_FAILED_MESSAGE),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
