// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use listing_enricher::{
    api::{ApiServer, AppState},
    config::Args,
    generation::ChatCompletionsClient,
    pipeline::EnrichmentPipeline,
    version,
};
use std::{env, sync::Arc};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real deployments set the environment directly
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    info!(
        "Starting listing enricher {} (built {})",
        version::VERSION,
        version::BUILD_DATE
    );
    info!("Features: {}", version::FEATURES.join(", "));
    info!("Configuration: {:?}", args);

    let normalize_config = args.normalize_config()?;
    let generator = ChatCompletionsClient::new(args.generation_config()?)?;

    let pipeline = EnrichmentPipeline::new(Arc::new(generator), normalize_config)
        .with_max_concurrent_items(args.max_concurrent_items);

    let server = ApiServer::new(args.api_config(), AppState::new(pipeline)).await?;
    info!("Ready: POST http://{}/api/process-images", server.local_addr());

    // Wait for shutdown signal
    signal::ctrl_c().await?;
    info!("Shutting down...");

    server.shutdown().await?;
    Ok(())
}
