// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod generation;
pub mod pipeline;
pub mod version;
pub mod vision;

pub use api::{ApiConfig, ApiServer, AppState};
pub use config::Args;
pub use generation::{ChatCompletionsClient, GenerationConfig, ModelProfile, TextGenerator};
pub use pipeline::{EnrichmentPipeline, EnrichmentResult, PipelineError, UploadBatch, UploadEntry};
pub use vision::{NormalizeConfig, NormalizedImage};
