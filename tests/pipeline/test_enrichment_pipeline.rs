// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Enrichment pipeline tests with a scripted text generator

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use listing_enricher::{
    generation::{GenerationError, ModelProfile, TextGenerator, DESCRIPTION_PROMPT},
    pipeline::{EnrichmentPipeline, PipelineError, UploadBatch, UploadEntry},
    vision::NormalizeConfig,
};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Numbers each description call and sleeps longer for earlier ones so
/// later photos finish first under concurrency
struct SlowFirstGenerator {
    descriptions: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    prompts: Mutex<Vec<(ModelProfile, String)>>,
}

impl SlowFirstGenerator {
    fn new() -> Self {
        Self {
            descriptions: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for SlowFirstGenerator {
    async fn generate(
        &self,
        profile: ModelProfile,
        prompt: &str,
    ) -> Result<Option<String>, GenerationError> {
        self.prompts
            .lock()
            .unwrap()
            .push((profile, prompt.to_string()));

        match profile {
            ModelProfile::Quality => {
                let n = self.descriptions.fetch_add(1, Ordering::SeqCst);
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(60u64.saturating_sub(n as u64 * 20))).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(Some(format!("Description {}", n)))
            }
            ModelProfile::Fast => Ok(Some("Caption".to_string())),
        }
    }
}

/// Same text for every photo
struct FixedGenerator {
    description: Option<String>,
    caption: Option<String>,
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(
        &self,
        profile: ModelProfile,
        _prompt: &str,
    ) -> Result<Option<String>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match profile {
            ModelProfile::Quality => self.description.clone(),
            ModelProfile::Fast => self.caption.clone(),
        })
    }
}

fn small_frame() -> NormalizeConfig {
    NormalizeConfig {
        width: 48,
        height: 32,
        quality: 80,
    }
}

fn image_entry(index: usize, color: [u8; 3]) -> UploadEntry {
    let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(24, 24, Rgb(color)));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png).unwrap();
    UploadEntry {
        field_name: format!("image_{}", index),
        file_name: Some(format!("photo-{}.png", index)),
        content_type: Some("image/png".to_string()),
        bytes: Bytes::from(buffer.into_inner()),
    }
}

fn center_pixel(data_uri: &str) -> [u8; 3] {
    let encoded = data_uri.trim_start_matches("data:image/jpeg;base64,");
    let bytes = STANDARD.decode(encoded).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
    img.get_pixel(img.width() / 2, img.height() / 2).0
}

fn corrupt_entry(index: usize) -> UploadEntry {
    UploadEntry {
        field_name: format!("image_{}", index),
        file_name: Some("corrupt.jpg".to_string()),
        content_type: Some("image/jpeg".to_string()),
        bytes: Bytes::from_static(b"\xFF\xD8\xFF\xE0 not really a jpeg"),
    }
}

#[tokio::test]
async fn test_order_preserved_under_concurrency() {
    let generator = Arc::new(SlowFirstGenerator::new());
    let pipeline =
        EnrichmentPipeline::new(generator.clone(), small_frame()).with_max_concurrent_items(3);

    let colors = [[250, 0, 0], [0, 250, 0], [0, 0, 250]];
    let batch = UploadBatch::new(
        colors
            .iter()
            .enumerate()
            .map(|(i, color)| image_entry(i, *color))
            .collect(),
    );
    let results = pipeline.process_batch(batch).await.unwrap();

    assert_eq!(results.len(), 3);
    for (result, color) in results.iter().zip(colors.iter()) {
        let pixel = center_pixel(&result.image);
        let channel = color.iter().position(|c| *c > 0).unwrap();
        assert!(pixel[channel] > 200, "expected {:?}, got {:?}", color, pixel);
    }
    assert!(generator.peak_in_flight.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn test_sequential_by_default() {
    let generator = Arc::new(SlowFirstGenerator::new());
    let pipeline = EnrichmentPipeline::new(generator.clone(), small_frame());
    assert_eq!(pipeline.max_concurrent_items(), 1);

    let batch = UploadBatch::new((0..3).map(|i| image_entry(i, [0, 0, 200])).collect());
    let results = pipeline.process_batch(batch).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(generator.peak_in_flight.load(Ordering::SeqCst), 1);

    // description, caption, description, caption, ...
    let prompts = generator.prompts.lock().unwrap();
    let profiles: Vec<_> = prompts.iter().map(|(p, _)| *p).collect();
    assert_eq!(
        profiles,
        vec![
            ModelProfile::Quality,
            ModelProfile::Fast,
            ModelProfile::Quality,
            ModelProfile::Fast,
            ModelProfile::Quality,
            ModelProfile::Fast,
        ]
    );
    assert_eq!(prompts[0].1, DESCRIPTION_PROMPT);
    assert!(prompts[1].1.contains("Description 0"));
}

#[tokio::test]
async fn test_last_item_failure_drops_everything() {
    let generator = Arc::new(FixedGenerator {
        description: Some("d".to_string()),
        caption: Some("c".to_string()),
        calls: AtomicUsize::new(0),
    });
    let pipeline =
        EnrichmentPipeline::new(generator, small_frame()).with_max_concurrent_items(4);

    let batch = UploadBatch::new(vec![
        image_entry(0, [10, 10, 10]),
        image_entry(1, [20, 20, 20]),
        corrupt_entry(2),
    ]);

    match pipeline.process_batch(batch).await {
        Err(PipelineError::Normalize { index, .. }) => assert_eq!(index, 2),
        other => panic!("expected normalize failure, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_placeholders() {
    let generator = Arc::new(FixedGenerator {
        description: Some(String::new()),
        caption: None,
        calls: AtomicUsize::new(0),
    });
    let pipeline = EnrichmentPipeline::new(generator.clone(), small_frame());

    let results = pipeline
        .process_batch(UploadBatch::new(vec![image_entry(0, [1, 1, 1])]))
        .await
        .unwrap();

    assert_eq!(results[0].description, "No description generated.");
    assert_eq!(results[0].social_content, "No social content generated.");
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_results_are_jpeg_data_uris() {
    let generator = Arc::new(FixedGenerator {
        description: Some("d".to_string()),
        caption: Some("c".to_string()),
        calls: AtomicUsize::new(0),
    });
    let pipeline = EnrichmentPipeline::new(generator, small_frame());

    let results = pipeline
        .process_batch(UploadBatch::new(vec![
            image_entry(0, [1, 2, 3]),
            image_entry(1, [4, 5, 6]),
        ]))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    for result in results {
        assert!(result.image.starts_with("data:image/jpeg;base64,"));
    }
}
