// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text generation for listing descriptions and social captions
//!
//! The hosted language model is reached through the `TextGenerator` trait so
//! the pipeline can run against a substitute in tests.

pub mod client;
pub mod prompts;

pub use client::{
    ChatCompletionsClient, GenerationConfig, GenerationError, ModelProfile, TextGenerator,
};
pub use prompts::{caption_prompt, CAPTION_PLACEHOLDER, DESCRIPTION_PLACEHOLDER, DESCRIPTION_PROMPT};
