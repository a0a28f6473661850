// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Server lifecycle tests: bind, serve over real TCP, shut down

use async_trait::async_trait;
use listing_enricher::{
    api::{ApiConfig, ApiServer, AppState},
    generation::{GenerationError, ModelProfile, TextGenerator},
    pipeline::EnrichmentPipeline,
    vision::NormalizeConfig,
};
use serde_json::Value;
use std::sync::Arc;

struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(
        &self,
        _profile: ModelProfile,
        prompt: &str,
    ) -> Result<Option<String>, GenerationError> {
        Ok(Some(prompt.chars().take(16).collect()))
    }
}

async fn start_server() -> ApiServer {
    let pipeline = EnrichmentPipeline::new(Arc::new(EchoGenerator), NormalizeConfig::default());
    let config = ApiConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        ..ApiConfig::default()
    };
    ApiServer::new(config, AppState::new(pipeline))
        .await
        .expect("server should bind")
}

#[tokio::test]
async fn test_server_serves_health_and_shuts_down() {
    let server = start_server().await;
    let addr = server.local_addr();
    assert_ne!(addr.port(), 0);

    let response = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap();
    assert!(response.status().is_success());
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ok");

    server.shutdown().await.unwrap();

    // Listener is closed after shutdown
    let after = reqwest::Client::new()
        .get(format!("http://{}/health", addr))
        .timeout(std::time::Duration::from_secs(2))
        .send()
        .await;
    assert!(after.is_err());
}

#[tokio::test]
async fn test_empty_upload_over_tcp() {
    let server = start_server().await;
    let addr = server.local_addr();

    let body = "--B\r\nContent-Disposition: form-data; name=\"listing_id\"\r\n\r\n42\r\n--B--\r\n";
    let response = reqwest::Client::new()
        .post(format!("http://{}/api/process-images", addr))
        .header("content-type", "multipart/form-data; boundary=B")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json, serde_json::json!({ "results": [] }));

    server.shutdown().await.unwrap();
}
