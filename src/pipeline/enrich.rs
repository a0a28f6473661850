// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Intake-and-enrichment pipeline
//!
//! Per accepted photo:
//! 1. Decode and fit to the canonical frame (blocking pool)
//! 2. Encode the JPEG as a data URI
//! 3. Generate a listing description (quality model)
//! 4. Generate a social caption from that description (fast model)
//!
//! Results come back in upload order. The first failing photo fails the
//! whole batch; no partial result set is ever returned.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::batch::{EnrichmentResult, UploadBatch, UploadEntry};
use crate::generation::prompts::{caption_prompt, or_placeholder};
use crate::generation::{
    GenerationError, ModelProfile, TextGenerator, CAPTION_PLACEHOLDER, DESCRIPTION_PLACEHOLDER,
    DESCRIPTION_PROMPT,
};
use crate::vision::{normalize_image, to_data_uri, NormalizeConfig, NormalizeError, NormalizedImage};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image {index} could not be processed: {source}")]
    Normalize {
        index: usize,
        #[source]
        source: NormalizeError,
    },

    #[error("Text generation failed for image {index}: {source}")]
    Generation {
        index: usize,
        #[source]
        source: GenerationError,
    },

    #[error("Normalization task failed: {0}")]
    Task(String),
}

/// Description and caption for one photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCopy {
    pub description: String,
    pub social_content: String,
}

pub struct EnrichmentPipeline {
    generator: Arc<dyn TextGenerator>,
    normalize: NormalizeConfig,
    max_concurrent_items: usize,
}

impl EnrichmentPipeline {
    /// Sequential pipeline (one photo at a time)
    pub fn new(generator: Arc<dyn TextGenerator>, normalize: NormalizeConfig) -> Self {
        Self {
            generator,
            normalize,
            max_concurrent_items: 1,
        }
    }

    /// Process up to `n` photos at once. Output order is unaffected.
    pub fn with_max_concurrent_items(mut self, n: usize) -> Self {
        self.max_concurrent_items = n.max(1);
        self
    }

    pub fn normalize_config(&self) -> &NormalizeConfig {
        &self.normalize
    }

    pub fn max_concurrent_items(&self) -> usize {
        self.max_concurrent_items
    }

    /// Enrich every accepted entry of `batch`, preserving upload order
    pub async fn process_batch(
        &self,
        batch: UploadBatch,
    ) -> Result<Vec<EnrichmentResult>, PipelineError> {
        let skipped = batch.entries.len() - batch.accepted_count();
        let entries = batch.into_accepted();

        let span = info_span!("batch", batch_id = %Uuid::new_v4(), items = entries.len());

        async move {
            if skipped > 0 {
                debug!("Skipping {} non-image parts", skipped);
            }

            let start = std::time::Instant::now();
            let results = stream::iter(entries.into_iter().enumerate())
                .map(|(index, entry)| self.enrich_item(index, entry))
                .buffered(self.max_concurrent_items)
                .try_collect::<Vec<_>>()
                .await
                .map_err(|e| {
                    warn!("Batch aborted: {}", e);
                    e
                })?;

            info!(
                "Batch complete: {} results, {}ms",
                results.len(),
                start.elapsed().as_millis()
            );
            Ok::<_, PipelineError>(results)
        }
        .instrument(span)
        .await
    }

    async fn enrich_item(
        &self,
        index: usize,
        entry: UploadEntry,
    ) -> Result<EnrichmentResult, PipelineError> {
        debug!(
            "Processing image {}: field={}, file={:?}, {} bytes",
            index,
            entry.field_name,
            entry.file_name,
            entry.bytes.len()
        );

        let normalized = self.normalize_entry(index, entry).await?;
        let image = to_data_uri(&normalized.bytes, normalized.media_type());

        let copy = self
            .generate_copy()
            .await
            .map_err(|source| PipelineError::Generation { index, source })?;

        Ok(EnrichmentResult {
            image,
            description: copy.description,
            social_content: copy.social_content,
        })
    }

    /// Run the CPU-bound normalization on the blocking pool
    async fn normalize_entry(
        &self,
        index: usize,
        entry: UploadEntry,
    ) -> Result<NormalizedImage, PipelineError> {
        let config = self.normalize;
        let bytes = entry.bytes;

        tokio::task::spawn_blocking(move || normalize_image(&bytes, &config))
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))?
            .map_err(|source| PipelineError::Normalize { index, source })
    }

    /// Description first, then a caption built from it.
    ///
    /// Missing or blank text is replaced with a placeholder instead of failing.
    pub async fn generate_copy(&self) -> Result<ListingCopy, GenerationError> {
        let description = self
            .generator
            .generate(ModelProfile::Quality, DESCRIPTION_PROMPT)
            .await?;
        let description = or_placeholder(description, DESCRIPTION_PLACEHOLDER);

        let social_content = self
            .generator
            .generate(ModelProfile::Fast, &caption_prompt(&description))
            .await?;
        let social_content = or_placeholder(social_content, CAPTION_PLACEHOLDER);

        Ok(ListingCopy {
            description,
            social_content,
        })
    }
}
