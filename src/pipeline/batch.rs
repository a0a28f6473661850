// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload batch and result types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Multipart field names carrying photos start with this prefix (`image_0`, `image_1`, ...)
pub const IMAGE_FIELD_PREFIX: &str = "image_";

/// One part of a multipart upload
#[derive(Debug, Clone)]
pub struct UploadEntry {
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadEntry {
    /// A file part under the `image_` field convention.
    ///
    /// Plain text fields and unrelated fields are not photos. The declared
    /// content type is not trusted: a mislabelled file is still accepted and
    /// later fails decoding.
    pub fn is_image_entry(&self) -> bool {
        self.field_name.starts_with(IMAGE_FIELD_PREFIX)
            && (self.file_name.is_some() || self.content_type.is_some())
    }
}

/// Every part received in one request, in body order
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    pub entries: Vec<UploadEntry>,
}

impl UploadBatch {
    pub fn new(entries: Vec<UploadEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: UploadEntry) {
        self.entries.push(entry);
    }

    /// Number of entries that will go through the pipeline
    pub fn accepted_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_image_entry()).count()
    }

    /// Consume the batch, keeping only photo entries in their original order
    pub fn into_accepted(self) -> Vec<UploadEntry> {
        self.entries
            .into_iter()
            .filter(UploadEntry::is_image_entry)
            .collect()
    }
}

/// Normalized photo plus its generated copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    /// `data:image/jpeg;base64,...`
    pub image: String,
    pub description: String,
    pub social_content: String,
}
