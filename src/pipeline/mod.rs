// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Photo intake and enrichment

pub mod batch;
pub mod enrich;

pub use batch::{EnrichmentResult, UploadBatch, UploadEntry, IMAGE_FIELD_PREFIX};
pub use enrich::{EnrichmentPipeline, ListingCopy, PipelineError};
