// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::health_handler;
use super::process_images::process_images_handler;
use super::server::ApiConfig;
use crate::pipeline::EnrichmentPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EnrichmentPipeline>,
}

impl AppState {
    pub fn new(pipeline: EnrichmentPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build the HTTP router
pub fn create_app(state: AppState, config: &ApiConfig) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/process-images", post(process_images_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
