// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::http_server::AppState;
use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: version::VERSION_NUMBER.to_string(),
            issues: None,
        }
    }
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut health = HealthResponse::ok();

    let config = state.pipeline.normalize_config();
    if config.validate().is_err() {
        health.status = "degraded".to_string();
        health.issues = Some(vec![format!(
            "invalid normalization config: {}x{} q{}",
            config.width, config.height, config.quality
        )]);
    }

    Json(health)
}
