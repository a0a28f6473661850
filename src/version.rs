// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the listing enricher

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-listing-enricher-2026-10-19";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "multipart-intake",
    "fit-to-frame-jpeg",
    "data-uri-results",
    "listing-description",
    "social-caption",
];
