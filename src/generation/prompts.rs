// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt templates and fallback text for listing copy

/// Listing description request. Carries no per-photo content.
pub const DESCRIPTION_PROMPT: &str = "Write a professional 2–3 sentence real estate description for a property.\nDetails: modern apartment with glass balcony, greenery, and good lighting.";

/// Used when the description response has no content
pub const DESCRIPTION_PLACEHOLDER: &str = "No description generated.";

/// Used when the caption response has no content
pub const CAPTION_PLACEHOLDER: &str = "No social content generated.";

/// Build the social caption prompt around a generated description
pub fn caption_prompt(description: &str) -> String {
    format!(
        "Create an engaging Twitter/Instagram style caption (under 280 characters) for this property description:\n\"{}\". Include emojis and a short call-to-action.",
        description
    )
}

/// Returns the generated text, or `placeholder` when it is missing or blank
pub fn or_placeholder(text: Option<String>, placeholder: &str) -> String {
    match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => placeholder.to_string(),
    }
}
