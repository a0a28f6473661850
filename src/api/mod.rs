// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod process_images;
pub mod server;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::HealthResponse;
pub use http_server::{create_app, AppState};
pub use process_images::{process_images_handler, ProcessImagesResponse};
pub use server::{ApiConfig, ApiServer};
