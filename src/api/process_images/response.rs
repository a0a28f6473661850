// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process images response types

use serde::{Deserialize, Serialize};

use crate::pipeline::EnrichmentResult;

/// Successful response, one result per accepted photo in upload order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessImagesResponse {
    pub results: Vec<EnrichmentResult>,
}

impl ProcessImagesResponse {
    pub fn new(results: Vec<EnrichmentResult>) -> Self {
        Self { results }
    }
}
