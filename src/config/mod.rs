// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration
//!
//! Every setting is a CLI flag backed by an environment variable, so a `.env`
//! file or the container environment is enough to run the server.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::fmt;
use std::time::Duration;

use crate::api::server::{ApiConfig, DEFAULT_MAX_BODY_BYTES};
use crate::generation::client::{
    GenerationConfig, DEFAULT_ENDPOINT, DEFAULT_FAST_MODEL, DEFAULT_QUALITY_MODEL,
    DEFAULT_TIMEOUT_SECS,
};
use crate::vision::normalize::{
    NormalizeConfig, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_JPEG_QUALITY,
};

/// Listing photo enrichment server
#[derive(Parser, Clone)]
#[command(name = "listing-enricher")]
#[command(version)]
#[command(about = "Normalizes property photos and writes listing copy for them", long_about = None)]
pub struct Args {
    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Bearer credential for the text generation service
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: String,

    /// OpenAI-compatible base URL
    #[arg(long, env = "GENERATION_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub generation_endpoint: String,

    /// Model used for listing descriptions
    #[arg(long, env = "DESCRIPTION_MODEL", default_value = DEFAULT_QUALITY_MODEL)]
    pub description_model: String,

    /// Model used for social captions
    #[arg(long, env = "CAPTION_MODEL", default_value = DEFAULT_FAST_MODEL)]
    pub caption_model: String,

    #[arg(long, env = "GENERATION_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub generation_timeout_secs: u64,

    #[arg(long, env = "FRAME_WIDTH", default_value_t = DEFAULT_FRAME_WIDTH)]
    pub frame_width: u32,

    #[arg(long, env = "FRAME_HEIGHT", default_value_t = DEFAULT_FRAME_HEIGHT)]
    pub frame_height: u32,

    /// JPEG quality of normalized photos (1-100)
    #[arg(long, env = "JPEG_QUALITY", default_value_t = DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    /// Photos processed at once within one request
    #[arg(long, env = "MAX_CONCURRENT_ITEMS", default_value_t = 1)]
    pub max_concurrent_items: usize,

    /// Largest accepted request body in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Args {
    pub fn generation_config(&self) -> Result<GenerationConfig> {
        if self.groq_api_key.trim().is_empty() {
            return Err(anyhow!("GROQ_API_KEY must not be empty"));
        }

        Ok(GenerationConfig {
            endpoint: self.generation_endpoint.clone(),
            api_key: self.groq_api_key.clone(),
            quality_model: self.description_model.clone(),
            fast_model: self.caption_model.clone(),
            timeout: Duration::from_secs(self.generation_timeout_secs),
        })
    }

    pub fn normalize_config(&self) -> Result<NormalizeConfig> {
        let config = NormalizeConfig {
            width: self.frame_width,
            height: self.frame_height,
            quality: self.jpeg_quality,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            listen_addr: self.listen_addr.clone(),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("listen_addr", &self.listen_addr)
            .field("groq_api_key", &"[REDACTED]")
            .field("generation_endpoint", &self.generation_endpoint)
            .field("description_model", &self.description_model)
            .field("caption_model", &self.caption_model)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .field("frame_width", &self.frame_width)
            .field("frame_height", &self.frame_height)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("max_concurrent_items", &self.max_concurrent_items)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
